use std::path::Path;

use roadmap_calendar::render;
use roadmap_calendar::settings;
use roadmap_calendar::storage::FolderStorage;
use roadmap_calendar::RoadmapEditor;

const STORAGE_FOLDER: &str = "example_roadmap";


fn main() {
    env_logger::init();

    let storage = FolderStorage::new(Path::new(STORAGE_FOLDER));
    let mut editor = RoadmapEditor::new(storage);

    println!("---- read-only view -----");
    print_roadmap(&editor);

    let password = match settings::EDIT_PASSWORD.lock() {
        Ok(password) => password.clone(),
        Err(err) => err.into_inner().clone(),
    };
    if let Err(err) = editor.enter_edit_mode(&password) {
        log::error!("Unable to edit the roadmap: {}", err);
        return;
    }

    // Drag over March 16th-18th, and assign the last stage to these days
    let march = match editor.displayed_months().get(1) {
        Some(month) => *month,
        None => return,
    };
    let grid = editor.grid(march);
    let cell = |day: u32| grid.iter().find(|c| c.is_current_month() && c.day() == day);
    if let (Some(from), Some(to)) = (cell(16), cell(18)) {
        editor.pointer_down(from);
        editor.pointer_enter(Some(to));
        editor.pointer_up(Some(to));
    }
    if let Some(last) = editor.roadmap().stages().last().map(|s| s.id().clone()) {
        match editor.pick_stage(&last) {
            Ok(outcome) => println!("Stage {} toggled: {:?}", last, outcome),
            Err(err) => log::warn!("{}", err),
        }
    }

    println!("---- edit view -----");
    print_roadmap(&editor);

    if let Err(err) = editor.save() {
        log::error!("{}", err);
    }
    editor.exit_edit_mode();
}

fn print_roadmap<S: roadmap_calendar::traits::Storage>(editor: &RoadmapEditor<S>) {
    let months: Vec<_> = editor.displayed_months().into_iter()
        .map(|ym| (ym, editor.grid(ym)))
        .collect();
    println!("{}", render::render_roadmap(editor.roadmap(), &months));
}
