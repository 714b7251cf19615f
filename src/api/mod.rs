pub mod client;
pub mod multipart;
pub mod testing;
pub mod transport;

pub use client::{ApiClient, Blob, Body, RequestOptions};
pub use multipart::MultipartForm;
pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};
