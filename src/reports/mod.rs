use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strum::IntoEnumIterator;
use swimset::allocator::{AllocationMode, BlockKind, DrillOutcome, Workout, WorkoutSegment};
use swimset::catalog::{Catalog, Category};
use swimset::levels::Level;

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    table
}

fn segment_row(table: &mut Table, label: &str, segment: Option<&WorkoutSegment>) {
    match segment {
        Some(s) => table.add_row(vec![
            Cell::new(label),
            Cell::new(&s.description),
            Cell::new(s.distance),
        ]),
        None => table.add_row(vec![
            Cell::new(label).fg(Color::DarkGrey),
            Cell::new("(dropped to fit target)").fg(Color::DarkGrey),
            Cell::new(0).fg(Color::DarkGrey),
        ]),
    };
}

pub fn print_workout(workout: &Workout) {
    println!(
        "\n🏊 {} workout ({})",
        workout.level.to_string().to_uppercase(),
        workout.mode
    );

    let mut table = new_table(&["Section", "Description", "Yds"]);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    segment_row(&mut table, "WARMUP", workout.warmup.as_ref());

    if workout.main.is_empty() {
        table.add_row(vec![
            Cell::new("MAIN").fg(Color::DarkGrey),
            Cell::new("(no blocks fit)").fg(Color::DarkGrey),
            Cell::new(0).fg(Color::DarkGrey),
        ]);
    }
    for block in workout.main.items() {
        let section = match block.kind {
            BlockKind::Main => Cell::new("MAIN").fg(Color::Cyan),
            BlockKind::Filler => Cell::new("FILLER"),
            BlockKind::Drill => Cell::new("DRILL").fg(Color::Green),
        };
        table.add_row(vec![
            section,
            Cell::new(&block.description),
            Cell::new(block.distance),
        ]);
    }

    segment_row(&mut table, "COOLDOWN", workout.cooldown.as_ref());
    println!("{}", table);

    match &workout.drill {
        Some(DrillOutcome::Unchanged) => println!("Drill: no placement kept the total on target"),
        Some(DrillOutcome::AcceptedImmediate(c)) | Some(DrillOutcome::AcceptedFallback(c)) => {
            println!("Drill: {} yds ({:?})", c.drill_distance, c.placement)
        }
        None => {}
    }

    if workout.mode == AllocationMode::MainOnly {
        println!(
            "Main set: {} yds (target was {} yds)",
            workout.main.total(),
            workout.target
        );
        println!("Total: {} yds", workout.grand_total());
    } else {
        println!(
            "Total: {} yds (target was {} yds)",
            workout.grand_total(),
            workout.target
        );
    }
}

pub fn print_catalog_level(catalog: &Catalog, level: Level) {
    println!("\nLevel: {}", level);
    let mut table = new_table(&["Category", "Yds", "Descriptions"]);
    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for category in Category::iter() {
        let entries = catalog.entries(category, level);
        if entries.is_empty() {
            table.add_row(vec![
                Cell::new(category).fg(Color::DarkGrey),
                Cell::new("-"),
                Cell::new("(none)").fg(Color::DarkGrey),
            ]);
            continue;
        }
        for entry in entries {
            table.add_row(vec![
                Cell::new(category),
                Cell::new(entry.distance),
                Cell::new(entry.variants.join("\n")),
            ]);
        }
    }
    println!("{}", table);
}

pub fn print_fillers(catalog: &Catalog) {
    println!("\nFillers (all levels)");
    let mut table = new_table(&["Yds", "Descriptions"]);
    if let Some(col) = table.column_mut(0) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    for entry in catalog.fillers() {
        table.add_row(vec![
            Cell::new(entry.distance),
            Cell::new(entry.variants.join(", ")),
        ]);
    }
    println!("{}", table);
}
