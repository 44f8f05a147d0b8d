use tabled::Table;

use crate::{info, management::ModelManager, mood::Mood, types::MoodTableRow};

/// Lists the four moods, their model class codes and whether a trained
/// model artifact is installed for each starting mood.
pub async fn moods() {
    let table_rows: Vec<MoodTableRow> = Mood::all()
        .iter()
        .map(|m| MoodTableRow {
            code: m.code(),
            mood: m.label().to_string(),
            model: if ModelManager::is_available(*m) {
                "available".to_string()
            } else {
                "missing".to_string()
            },
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);

    info!("A transition request needs the model of its starting mood.");
}
