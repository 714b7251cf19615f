use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::family::Family;
use super::ids::Id;
use super::parcialidad::Parcialidad;

/// A census record for a member of the community.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(alias = "idPersona")]
    pub id: Id<Person>,
    #[serde(rename = "nombres", alias = "nombre")]
    pub first_names: String,
    #[serde(rename = "apellidos", alias = "apellido", default)]
    pub last_names: String,
    #[serde(rename = "dpi", alias = "documento", default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(rename = "fechaNacimiento", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "sexo", default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "idFamilia", default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<Id<Family>>,
    #[serde(rename = "idParcialidad", default, skip_serializing_if = "Option::is_none")]
    pub parcialidad_id: Option<Id<Parcialidad>>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

/// Fields sent when creating or replacing a person.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PersonForm {
    #[serde(rename = "nombres")]
    pub first_names: String,
    #[serde(rename = "apellidos")]
    pub last_names: String,
    #[serde(rename = "dpi", skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(rename = "fechaNacimiento", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(rename = "sexo", skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "idFamilia", skip_serializing_if = "Option::is_none")]
    pub family_id: Option<Id<Family>>,
    #[serde(rename = "idParcialidad", skip_serializing_if = "Option::is_none")]
    pub parcialidad_id: Option<Id<Parcialidad>>,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
            .trim()
            .to_string()
    }

    /// Current values as an editable form.
    pub fn to_form(&self) -> PersonForm {
        PersonForm {
            first_names: self.first_names.clone(),
            last_names: self.last_names.clone(),
            document: self.document.clone(),
            birth_date: self.birth_date,
            sex: self.sex.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            family_id: self.family_id,
            parcialidad_id: self.parcialidad_id,
        }
    }
}

fn default_true() -> bool {
    true
}
