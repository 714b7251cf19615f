use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::parcialidad::Parcialidad;

/// A household grouping of persons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    #[serde(alias = "idFamilia")]
    pub id: Id<Family>,
    #[serde(rename = "nombreFamilia", alias = "nombre")]
    pub name: String,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "idParcialidad", default, skip_serializing_if = "Option::is_none")]
    pub parcialidad_id: Option<Id<Parcialidad>>,
    #[serde(rename = "totalMiembros", default, skip_serializing_if = "Option::is_none")]
    pub member_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FamilyForm {
    #[serde(rename = "nombreFamilia")]
    pub name: String,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "idParcialidad", skip_serializing_if = "Option::is_none")]
    pub parcialidad_id: Option<Id<Parcialidad>>,
}
