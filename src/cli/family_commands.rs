use crate::cli::context::CliContext;
use crate::cli::meeting_commands::split_page_and_search;
use crate::cli::person_commands::optional_id;
use crate::error::{CommunityError, CommunityResult};
use crate::model::{Family, FamilyForm, Id, ListQuery, Parcialidad, ParcialidadForm};
use crate::ops::{family_ops, parcialidad_ops};
use crate::views::Notice;

/// `families [page] [search]`
pub fn list(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let (page, search) = split_page_and_search(args);
    let query = ListQuery {
        page,
        search,
        ..ListQuery::default()
    };
    let result = family_ops::list_families(&ctx.client, &query)?;

    if result.is_empty() {
        println!("No families found.");
        return Ok(());
    }
    println!("Families (page {}/{}, {} total):", result.page, result.page_count(), result.total);
    for family in &result.data {
        let members = family.member_count.map(|n| format!(" ({} members)", n)).unwrap_or_default();
        println!("  #{} {}{}", family.id, family.name, members);
    }
    if result.has_next() {
        println!("More: families {}", result.page + 1);
    }
    Ok(())
}

pub fn show(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Family> = match ctx.parse_id(args, "show-family <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let family = family_ops::get_family(&ctx.client, id)?;
    let members = family_ops::family_members(&ctx.client, id)?;

    println!();
    println!("Family #{}: {}", family.id, family.name);
    if let Some(address) = &family.address {
        println!("Address: {}", address);
    }
    if let Some(parcialidad_id) = family.parcialidad_id {
        println!("Parcialidad: #{}", parcialidad_id);
    }
    if members.is_empty() {
        println!("No members.");
    } else {
        println!("Members ({}):", members.len());
        for person in &members {
            println!("  #{} {}", person.id, person.full_name());
        }
    }
    Ok(())
}

fn fill_form(ctx: &CliContext, form: &mut FamilyForm) -> CommunityResult<bool> {
    form.name = match ctx.prompt_with_default("Family name", &form.name) {
        Some(s) => s,
        None => return Ok(false),
    };
    form.address = match ctx.prompt_optional("Address", form.address.as_deref()) {
        Some(v) => v,
        None => return Ok(false),
    };
    let current = form.parcialidad_id.map(|id| id.to_string());
    form.parcialidad_id = match ctx.prompt_optional("Parcialidad id", current.as_deref()) {
        Some(v) => optional_id(v, "parcialidad id")?,
        None => return Ok(false),
    };
    Ok(true)
}

pub fn add(ctx: &CliContext) -> CommunityResult<()> {
    println!("New family");
    let mut form = FamilyForm::default();
    if !fill_form(ctx, &mut form)? {
        return Ok(());
    }
    family_ops::add_family(&ctx.client, &form)?;
    ctx.print_notice(&Notice::Success(format!("Added family {}.", form.name.trim())));
    Ok(())
}

pub fn edit(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Family> = match ctx.parse_id(args, "edit-family <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let family = family_ops::get_family(&ctx.client, id)?;
    let mut form = FamilyForm {
        name: family.name,
        address: family.address,
        parcialidad_id: family.parcialidad_id,
    };
    if !fill_form(ctx, &mut form)? {
        return Ok(());
    }
    family_ops::update_family(&ctx.client, id, &form)?;
    ctx.print_notice(&Notice::Success("Family updated.".into()));
    Ok(())
}

pub fn delete(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Family> = match ctx.parse_id(args, "delete-family <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let family = family_ops::get_family(&ctx.client, id)?;
    if !ctx.confirm(&format!("Delete family {}?", family.name)) {
        return Ok(());
    }
    family_ops::delete_family(&ctx.client, id)?;
    println!("Family deleted.");
    Ok(())
}

// Parcialidades

pub fn list_parcialidades(ctx: &CliContext) -> CommunityResult<()> {
    let all = parcialidad_ops::list_parcialidades(&ctx.client)?;
    if all.is_empty() {
        println!("No parcialidades found.");
        return Ok(());
    }
    println!("Parcialidades ({}):", all.len());
    for p in &all {
        match &p.description {
            Some(description) => println!("  #{} {} - {}", p.id, p.name, description),
            None => println!("  #{} {}", p.id, p.name),
        }
    }
    Ok(())
}

fn find_parcialidad(ctx: &CliContext, id: Id<Parcialidad>) -> CommunityResult<Parcialidad> {
    parcialidad_ops::list_parcialidades(&ctx.client)?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CommunityError::NotFound {
            entity_type: "Parcialidad".into(),
            id: id.to_string(),
        })
}

fn fill_parcialidad(ctx: &CliContext, form: &mut ParcialidadForm) -> bool {
    form.name = match ctx.prompt_with_default("Name", &form.name) {
        Some(s) => s,
        None => return false,
    };
    form.description = match ctx.prompt_optional("Description", form.description.as_deref()) {
        Some(v) => v,
        None => return false,
    };
    true
}

pub fn add_parcialidad(ctx: &CliContext) -> CommunityResult<()> {
    let mut form = ParcialidadForm::default();
    if !fill_parcialidad(ctx, &mut form) {
        return Ok(());
    }
    parcialidad_ops::add_parcialidad(&ctx.client, &form)?;
    ctx.print_notice(&Notice::Success(format!("Added parcialidad {}.", form.name.trim())));
    Ok(())
}

pub fn edit_parcialidad(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Parcialidad> = match ctx.parse_id(args, "edit-parcialidad <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let current = find_parcialidad(ctx, id)?;
    let mut form = ParcialidadForm {
        name: current.name,
        description: current.description,
    };
    if !fill_parcialidad(ctx, &mut form) {
        return Ok(());
    }
    parcialidad_ops::update_parcialidad(&ctx.client, id, &form)?;
    ctx.print_notice(&Notice::Success("Parcialidad updated.".into()));
    Ok(())
}

pub fn delete_parcialidad(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Parcialidad> = match ctx.parse_id(args, "delete-parcialidad <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let current = find_parcialidad(ctx, id)?;
    if !ctx.confirm(&format!("Delete parcialidad {}?", current.name)) {
        return Ok(());
    }
    parcialidad_ops::delete_parcialidad(&ctx.client, id)?;
    println!("Parcialidad deleted.");
    Ok(())
}
