use crate::api::{ApiClient, RequestOptions};
use crate::error::CommunityResult;
use crate::model::{Id, ListQuery, Page, Person, PersonForm};
use crate::validation::{self, trim_optional};

const BASE: &str = "/personas";

fn person_path(id: Id<Person>) -> String {
    format!("{}/{}", BASE, id)
}

pub fn list_people(client: &ApiClient, query: &ListQuery) -> CommunityResult<Page<Person>> {
    client.json(BASE, RequestOptions::get().query(query.to_pairs()))
}

pub fn get_person(client: &ApiClient, id: Id<Person>) -> CommunityResult<Person> {
    client.json(&person_path(id), RequestOptions::get())
}

/// Trims every field and rejects blank names.
pub fn clean_form(form: &PersonForm) -> CommunityResult<PersonForm> {
    Ok(PersonForm {
        first_names: validation::non_blank(&form.first_names, "first names")?,
        last_names: validation::non_blank(&form.last_names, "last names")?,
        document: trim_optional(form.document.as_deref()),
        birth_date: form.birth_date,
        sex: trim_optional(form.sex.as_deref()),
        phone: trim_optional(form.phone.as_deref()),
        address: trim_optional(form.address.as_deref()),
        family_id: form.family_id,
        parcialidad_id: form.parcialidad_id,
    })
}

pub fn add_person(client: &ApiClient, form: &PersonForm) -> CommunityResult<()> {
    let form = clean_form(form)?;
    client.execute(BASE, RequestOptions::post().json(&form)?)?;
    Ok(())
}

pub fn update_person(client: &ApiClient, id: Id<Person>, form: &PersonForm) -> CommunityResult<()> {
    let form = clean_form(form)?;
    client.execute(&person_path(id), RequestOptions::put().json(&form)?)?;
    Ok(())
}

pub fn delete_person(client: &ApiClient, id: Id<Person>) -> CommunityResult<()> {
    client.execute(&person_path(id), RequestOptions::delete())?;
    Ok(())
}
