use crate::cli;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use heapdex::{
    Document, SearchEngine, SearchHit, analyzers::RankConfig, measure_time, utils::human_duration,
};
use log::{error, info};
use num_format::{Locale, ToFormattedString};
use std::{
    error::Error,
    path::{Path, PathBuf},
};

pub fn search(
    dir: PathBuf,
    query: &[String],
    k: usize,
    config: &RankConfig,
    no_progress_bar: bool,
) -> Result<(), Box<dyn Error>> {
    config.validate()?;

    let files = cli::list_files(&dir)?;
    let (documents, load_duration) = measure_time!({ load_documents(&files, no_progress_bar)? });
    info!(
        "Loaded {} of {} file(s) in {}",
        documents.len().to_formatted_string(&Locale::en),
        files.len().to_formatted_string(&Locale::en),
        human_duration(load_duration)
    );

    let num_words: usize = documents.iter().map(|d| d.words.len()).sum();
    let (engine, index_duration) = measure_time!({ SearchEngine::new(documents, config)? });
    info!(
        "Indexed {} words in {} ({} page rank passes)",
        num_words.to_formatted_string(&Locale::en),
        human_duration(index_duration),
        engine.page_rank().iterations()
    );

    let (hits, search_duration) = measure_time!({ engine.search(query, k)? });
    info!(
        "Found {} result(s) in {}",
        hits.len(),
        human_duration(search_duration)
    );

    if !hits.is_empty() {
        println!("{}", results_table(&hits));
    }
    Ok(())
}

/// Parses every file as a document named after its file name. Unreadable files are
/// logged and skipped.
fn load_documents(
    files: &[PathBuf],
    no_progress_bar: bool,
) -> Result<Vec<Document>, Box<dyn Error>> {
    let pb = if !no_progress_bar && cli::should_use_progress_bar(files.len()) {
        Some(cli::create_progress_bar(files.len())?)
    } else {
        None
    };

    let mut documents = Vec::with_capacity(files.len());
    for path in files {
        match load_document(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => error!("Error while loading {:?}: {}", path, e),
        }
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = &pb {
        pb.finish_and_clear();
    }

    Ok(documents)
}

fn load_document(path: &Path) -> Result<Document, Box<dyn Error>> {
    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| format!("Path {:?} has no file name", path))?;
    cli::with_file_text(path, |text| Document::parse(id, text))
}

fn results_table(hits: &[SearchHit]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Document", "Relevance", "Page rank"]);

    for (rank, hit) in hits.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1).set_alignment(CellAlignment::Right),
            Cell::new(&hit.id).fg(Color::Green),
            Cell::new(format!("{:.4}", hit.relevance)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", hit.page_rank)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
