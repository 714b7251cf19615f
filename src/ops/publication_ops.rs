use std::path::Path;

use crate::api::{ApiClient, MultipartForm, RequestOptions};
use crate::error::CommunityResult;
use crate::model::{Id, Photo, Publication, PublicationForm};
use crate::validation;

const BASE: &str = "/index/index";

fn publication_path(id: Id<Publication>) -> String {
    format!("{}/{}", BASE, id)
}

pub fn list_publications(client: &ApiClient) -> CommunityResult<Vec<Publication>> {
    client.json(BASE, RequestOptions::get())
}

pub fn get_publication(client: &ApiClient, id: Id<Publication>) -> CommunityResult<Publication> {
    client.json(&publication_path(id), RequestOptions::get())
}

fn photo_form(mut form: MultipartForm, photos: &[&Path]) -> CommunityResult<MultipartForm> {
    for path in photos {
        form = form.file_from_path("fotos", path)?;
    }
    Ok(form)
}

/// Creates a publication; text fields and photos go up as one multipart body.
pub fn create_publication(client: &ApiClient, form: &PublicationForm, photos: &[&Path]) -> CommunityResult<()> {
    let title = validation::non_blank(&form.title, "title")?;
    let body = validation::non_blank(&form.body, "content")?;

    let mut multipart = MultipartForm::new().text("titulo", &title).text("contenido", &body);
    if let Some(date) = form.date {
        multipart = multipart.text("fecha", &date.to_string());
    }
    let multipart = photo_form(multipart, photos)?;

    client.execute(BASE, RequestOptions::post().multipart(multipart))?;
    Ok(())
}

pub fn update_publication(client: &ApiClient, id: Id<Publication>, form: &PublicationForm) -> CommunityResult<()> {
    let cleaned = PublicationForm {
        title: validation::non_blank(&form.title, "title")?,
        body: validation::non_blank(&form.body, "content")?,
        date: form.date,
    };
    client.execute(&publication_path(id), RequestOptions::put().json(&cleaned)?)?;
    Ok(())
}

pub fn delete_publication(client: &ApiClient, id: Id<Publication>) -> CommunityResult<()> {
    client.execute(&publication_path(id), RequestOptions::delete())?;
    Ok(())
}

pub fn add_photos(client: &ApiClient, id: Id<Publication>, photos: &[&Path]) -> CommunityResult<()> {
    let form = photo_form(MultipartForm::new(), photos)?;
    if form.is_empty() {
        return Ok(());
    }
    client.execute(
        &format!("{}/fotos", publication_path(id)),
        RequestOptions::post().multipart(form),
    )?;
    Ok(())
}

pub fn delete_photo(client: &ApiClient, photo_id: Id<Photo>) -> CommunityResult<()> {
    client.execute(&format!("{}/fotos/{}", BASE, photo_id), RequestOptions::delete())?;
    Ok(())
}
