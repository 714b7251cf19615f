use serde::{Deserialize, Serialize};

use super::ids::Id;

/// A sub-community or locality that persons and families belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcialidad {
    #[serde(alias = "idParcialidad")]
    pub id: Id<Parcialidad>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParcialidadForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
