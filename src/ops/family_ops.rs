use crate::api::{ApiClient, RequestOptions};
use crate::error::CommunityResult;
use crate::model::{Family, FamilyForm, Id, ListQuery, Page, Person};
use crate::validation::{self, trim_optional};

const BASE: &str = "/familias";

fn family_path(id: Id<Family>) -> String {
    format!("{}/{}", BASE, id)
}

pub fn list_families(client: &ApiClient, query: &ListQuery) -> CommunityResult<Page<Family>> {
    client.json(BASE, RequestOptions::get().query(query.to_pairs()))
}

pub fn get_family(client: &ApiClient, id: Id<Family>) -> CommunityResult<Family> {
    client.json(&family_path(id), RequestOptions::get())
}

pub fn family_members(client: &ApiClient, id: Id<Family>) -> CommunityResult<Vec<Person>> {
    client.json(&format!("{}/miembros", family_path(id)), RequestOptions::get())
}

fn clean(form: &FamilyForm) -> CommunityResult<FamilyForm> {
    Ok(FamilyForm {
        name: validation::non_blank(&form.name, "family name")?,
        address: trim_optional(form.address.as_deref()),
        parcialidad_id: form.parcialidad_id,
    })
}

pub fn add_family(client: &ApiClient, form: &FamilyForm) -> CommunityResult<()> {
    client.execute(BASE, RequestOptions::post().json(&clean(form)?)?)?;
    Ok(())
}

pub fn update_family(client: &ApiClient, id: Id<Family>, form: &FamilyForm) -> CommunityResult<()> {
    client.execute(&family_path(id), RequestOptions::put().json(&clean(form)?)?)?;
    Ok(())
}

pub fn delete_family(client: &ApiClient, id: Id<Family>) -> CommunityResult<()> {
    client.execute(&family_path(id), RequestOptions::delete())?;
    Ok(())
}
