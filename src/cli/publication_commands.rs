use std::path::{Path, PathBuf};

use crate::cli::context::CliContext;
use crate::error::CommunityResult;
use crate::model::{Id, Photo, Publication, PublicationForm};
use crate::ops::publication_ops;
use crate::validation;
use crate::views::Notice;

pub fn list(ctx: &CliContext) -> CommunityResult<()> {
    let all = publication_ops::list_publications(&ctx.client)?;
    if all.is_empty() {
        println!("No publications.");
        return Ok(());
    }
    println!("Publications ({}):", all.len());
    for p in &all {
        let date = p.date.map(|d| d.to_string()).unwrap_or_else(|| "-".into());
        println!("  #{} {} ({}) [{} photos]", p.id, p.title, date, p.photos.len());
    }
    Ok(())
}

pub fn show(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Publication> = match ctx.parse_id(args, "show-publication <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let p = publication_ops::get_publication(&ctx.client, id)?;

    println!();
    println!("Publication #{}: {}", p.id, p.title);
    if let Some(date) = p.date {
        println!("Date: {}", date);
    }
    println!();
    println!("{}", p.body);
    if !p.photos.is_empty() {
        println!();
        println!("Photos:");
        for photo in &p.photos {
            println!("  #{} {}", photo.id, photo.url);
        }
    }
    Ok(())
}

fn split_paths(input: &str) -> Vec<PathBuf> {
    input.split_whitespace().map(PathBuf::from).collect()
}

fn fill_form(ctx: &CliContext, form: &mut PublicationForm) -> CommunityResult<bool> {
    form.title = match ctx.prompt_with_default("Title", &form.title) {
        Some(s) => s,
        None => return Ok(false),
    };
    form.body = match ctx.prompt_with_default("Content", &form.body) {
        Some(s) => s,
        None => return Ok(false),
    };
    let current = form.date.map(|d| d.to_string());
    form.date = match ctx.prompt_optional("Date (YYYY-MM-DD)", current.as_deref()) {
        Some(Some(s)) => Some(validation::date(&s, "date")?),
        Some(None) => None,
        None => return Ok(false),
    };
    Ok(true)
}

pub fn add(ctx: &CliContext) -> CommunityResult<()> {
    println!("New publication");
    let mut form = PublicationForm {
        date: Some(CliContext::today()),
        ..PublicationForm::default()
    };
    if !fill_form(ctx, &mut form)? {
        return Ok(());
    }
    let photos = split_paths(&ctx.prompt("Photo files (space separated, optional): ").unwrap_or_default());
    let refs: Vec<&Path> = photos.iter().map(PathBuf::as_path).collect();

    publication_ops::create_publication(&ctx.client, &form, &refs)?;
    ctx.print_notice(&Notice::Success("Publication created.".into()));
    Ok(())
}

pub fn edit(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Publication> = match ctx.parse_id(args, "edit-publication <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let current = publication_ops::get_publication(&ctx.client, id)?;
    let mut form = PublicationForm {
        title: current.title,
        body: current.body,
        date: current.date,
    };
    if !fill_form(ctx, &mut form)? {
        return Ok(());
    }
    publication_ops::update_publication(&ctx.client, id, &form)?;
    ctx.print_notice(&Notice::Success("Publication updated.".into()));
    Ok(())
}

pub fn delete(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Publication> = match ctx.parse_id(args, "delete-publication <id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    let current = publication_ops::get_publication(&ctx.client, id)?;
    if !ctx.confirm(&format!("Delete '{}'?", current.title)) {
        return Ok(());
    }
    publication_ops::delete_publication(&ctx.client, id)?;
    println!("Publication deleted.");
    Ok(())
}

/// `add-photos <publication-id> <file>...`
pub fn add_photos(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let usage = "add-photos <publication-id> <file>...";
    let id: Id<Publication> = match ctx.parse_id(args, usage) {
        Some(id) => id,
        None => return Ok(()),
    };
    let photos: Vec<PathBuf> = split_paths(args).into_iter().skip(1).collect();
    if photos.is_empty() {
        println!("Usage: {}", usage);
        return Ok(());
    }
    let refs: Vec<&Path> = photos.iter().map(PathBuf::as_path).collect();
    publication_ops::add_photos(&ctx.client, id, &refs)?;
    ctx.print_notice(&Notice::Success(format!("Uploaded {} photo(s).", refs.len())));
    Ok(())
}

pub fn delete_photo(ctx: &CliContext, args: &str) -> CommunityResult<()> {
    let id: Id<Photo> = match ctx.parse_id(args, "delete-photo <photo-id>") {
        Some(id) => id,
        None => return Ok(()),
    };
    if !ctx.confirm(&format!("Delete photo #{}?", id)) {
        return Ok(());
    }
    publication_ops::delete_photo(&ctx.client, id)?;
    println!("Photo deleted.");
    Ok(())
}
