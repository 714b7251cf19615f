use crate::cli::context::CliContext;
use crate::cli::meeting_commands::split_page_and_search;
use crate::error::{CommunityError, CommunityResult};
use crate::model::{Id, ListQuery, Person, PersonForm};
use crate::ops::person_ops;
use crate::validation;
use crate::views::Notice;

fn print_row(person: &Person) {
    let document = person.document.as_deref().unwrap_or("-");
    let inactive = if person.active { "" } else { " (inactive)" };
    println!("  #{} {} [{}]{}", person.id, person.full_name(), document, inactive);
}

/// `people [page] [search]`
pub fn list(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let (page, search) = split_page_and_search(args);
    let query = ListQuery {
        page,
        search,
        ..ListQuery::default()
    };
    let result = person_ops::list_people(&ctx.client, &query)?;

    if result.is_empty() {
        println!("No people found.");
        return Ok(());
    }
    println!("People (page {}/{}, {} total):", result.page, result.page_count(), result.total);
    for person in &result.data {
        print_row(person);
    }
    if result.has_next() {
        println!("More: people {}", result.page + 1);
    }
    Ok(())
}

pub fn show(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Person> = match ctx.parse_id(args, "show-person <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let p = person_ops::get_person(&ctx.client, id)?;

    println!();
    println!("Person #{}: {}", p.id, p.full_name());
    if let Some(document) = &p.document {
        println!("DPI: {}", document);
    }
    if let Some(birth_date) = p.birth_date {
        println!("Born: {}", birth_date);
    }
    if let Some(sex) = &p.sex {
        println!("Sex: {}", sex);
    }
    if let Some(phone) = &p.phone {
        println!("Phone: {}", phone);
    }
    if let Some(address) = &p.address {
        println!("Address: {}", address);
    }
    if let Some(family_id) = p.family_id {
        println!("Family: #{}", family_id);
    }
    if let Some(parcialidad_id) = p.parcialidad_id {
        println!("Parcialidad: #{}", parcialidad_id);
    }
    println!("Active: {}", if p.active { "yes" } else { "no" });
    Ok(())
}

/// Walks every field of the form. Returns None if input ended.
fn fill_form(ctx: &CliContext, form: &mut PersonForm) -> CommunityResult<Option<()>> {
    macro_rules! or_stop {
        ($e:expr) => {
            match $e {
                Some(v) => v,
                None => return Ok(None),
            }
        };
    }

    form.first_names = or_stop!(ctx.prompt_with_default("First names", &form.first_names));
    form.last_names = or_stop!(ctx.prompt_with_default("Last names", &form.last_names));
    form.document = or_stop!(ctx.prompt_optional("DPI", form.document.as_deref()));

    let birth = form.birth_date.map(|d| d.to_string());
    form.birth_date = match or_stop!(ctx.prompt_optional("Birth date (YYYY-MM-DD)", birth.as_deref())) {
        Some(s) => Some(validation::date(&s, "birth date")?),
        None => None,
    };

    form.sex = or_stop!(ctx.prompt_optional("Sex", form.sex.as_deref()));
    form.phone = or_stop!(ctx.prompt_optional("Phone", form.phone.as_deref()));
    form.address = or_stop!(ctx.prompt_optional("Address", form.address.as_deref()));

    let family = form.family_id.map(|id| id.to_string());
    form.family_id = optional_id(or_stop!(ctx.prompt_optional("Family id", family.as_deref())), "family id")?;
    let parcialidad = form.parcialidad_id.map(|id| id.to_string());
    form.parcialidad_id = optional_id(
        or_stop!(ctx.prompt_optional("Parcialidad id", parcialidad.as_deref())),
        "parcialidad id",
    )?;

    Ok(Some(()))
}

pub(crate) fn optional_id<T>(input: Option<String>, field: &str) -> CommunityResult<Option<Id<T>>> {
    match input {
        Some(s) => Id::parse(&s).map(Some).map_err(|_| CommunityError::InvalidFormat {
            field: field.to_string(),
            expected: "a number".into(),
        }),
        None => Ok(None),
    }
}

pub fn add(ctx: &CliContext) -> CommunityResult<()> {
    println!("New person");
    let mut form = PersonForm::default();
    if fill_form(ctx, &mut form)?.is_none() {
        return Ok(());
    }
    person_ops::add_person(&ctx.client, &form)?;
    ctx.print_notice(&Notice::Success(format!("Added {} {}.", form.first_names.trim(), form.last_names.trim())));
    Ok(())
}

pub fn edit(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Person> = match ctx.parse_id(args, "edit-person <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let person = person_ops::get_person(&ctx.client, id)?;
    println!("Editing {} (Enter keeps the current value)", person.full_name());

    let mut form = person.to_form();
    if fill_form(ctx, &mut form)?.is_none() {
        return Ok(());
    }
    person_ops::update_person(&ctx.client, id, &form)?;
    ctx.print_notice(&Notice::Success("Person updated.".into()));
    Ok(())
}

pub fn delete(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Person> = match ctx.parse_id(args, "delete-person <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let person = person_ops::get_person(&ctx.client, id)?;
    if !ctx.confirm(&format!("Delete {}?", person.full_name())) {
        return Ok(());
    }
    person_ops::delete_person(&ctx.client, id)?;
    println!("Person deleted.");
    Ok(())
}
