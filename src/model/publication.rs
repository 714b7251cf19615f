use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::Id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    #[serde(alias = "idFoto")]
    pub id: Id<Photo>,
    #[serde(rename = "url", alias = "ruta")]
    pub url: String,
}

/// A news item shown on the public landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(alias = "idPublicacion")]
    pub id: Id<Publication>,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "contenido", alias = "descripcion", default)]
    pub body: String,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "fotos", default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublicationForm {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "contenido")]
    pub body: String,
    #[serde(rename = "fecha", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}
