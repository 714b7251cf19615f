use crate::api::{ApiClient, RequestOptions};
use crate::error::CommunityResult;
use crate::model::{Id, Parcialidad, ParcialidadForm};
use crate::validation::{self, trim_optional};

const BASE: &str = "/parcialidad";

fn parcialidad_path(id: Id<Parcialidad>) -> String {
    format!("{}/{}", BASE, id)
}

/// The list is small and unpaginated.
pub fn list_parcialidades(client: &ApiClient) -> CommunityResult<Vec<Parcialidad>> {
    client.json(BASE, RequestOptions::get())
}

fn clean(form: &ParcialidadForm) -> CommunityResult<ParcialidadForm> {
    Ok(ParcialidadForm {
        name: validation::non_blank(&form.name, "name")?,
        description: trim_optional(form.description.as_deref()),
    })
}

pub fn add_parcialidad(client: &ApiClient, form: &ParcialidadForm) -> CommunityResult<()> {
    client.execute(BASE, RequestOptions::post().json(&clean(form)?)?)?;
    Ok(())
}

pub fn update_parcialidad(client: &ApiClient, id: Id<Parcialidad>, form: &ParcialidadForm) -> CommunityResult<()> {
    client.execute(&parcialidad_path(id), RequestOptions::put().json(&clean(form)?)?)?;
    Ok(())
}

pub fn delete_parcialidad(client: &ApiClient, id: Id<Parcialidad>) -> CommunityResult<()> {
    client.execute(&parcialidad_path(id), RequestOptions::delete())?;
    Ok(())
}
