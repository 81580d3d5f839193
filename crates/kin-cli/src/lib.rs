//! CLI logic for the Kin family-tree tool.
//!
//! This module contains the core CLI logic for the Kin family-tree tool.

mod args;
mod config;

pub use args::{Args, Command, Format};

use std::fs;

use log::info;

use kin::{KinError, TreeBuilder};

/// Run the Kin CLI application
///
/// This function loads the configuration and the input dataset, then
/// dispatches on the selected subcommand.
///
/// # Errors
///
/// Returns `KinError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Import errors (malformed dataset files)
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), KinError> {
    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;
    let builder = TreeBuilder::new(app_config);

    match &args.command {
        Command::Render {
            input,
            output,
            format,
        } => {
            info!(input_path = input, output_path = output; "Rendering family tree");

            let source = fs::read_to_string(input)?;
            let dataset = builder.load_json(&source)?;

            let rendered = match format {
                Format::Svg => builder.render_svg(&dataset)?,
                Format::Dot => builder.render_dot(&dataset)?,
            };

            fs::write(output, rendered)?;
            info!(output_file = output; "Diagram exported successfully");
        }
        Command::Guests {
            input,
            output,
            invited_only,
        } => {
            info!(input_path = input; "Exporting guest list");

            let source = fs::read_to_string(input)?;
            let dataset = builder.load_json(&source)?;
            let csv_text = builder.guest_list_csv(&dataset, *invited_only)?;

            match output {
                Some(path) => {
                    fs::write(path, csv_text)?;
                    info!(output_file = path; "Guest list exported successfully");
                }
                None => print!("{csv_text}"),
            }
        }
        Command::Stats { input } => {
            let source = fs::read_to_string(input)?;
            let dataset = builder.load_json(&source)?;

            println!("People:        {}", dataset.len());
            println!("Relationships: {}", dataset.relationships().len());
            println!("Guest count:   {}", dataset.guest_count());
            match dataset.root() {
                Some(root) => println!("Root:          {root}"),
                None => println!("Root:          (unset)"),
            }
        }
    }

    Ok(())
}
