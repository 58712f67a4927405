use clap::Parser;
use dialoguer::Confirm;
use passport_common::{random_form, PassportStore, SystemClock, ORIGINS};
use passport_wall::{cli, config, error, export, file_storage, logging, output};
use cli::{Cli, Commands, OutputFormat};
use config::Config;
use error::{PassportWallError, Result};
use file_storage::FileStorage;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    let open_store = || -> Result<PassportStore<FileStorage>> {
        let path = config.resolve_store_path(cli.store.as_deref())?;
        tracing::debug!(path = %path.display(), "opening passport store");
        Ok(PassportStore::load_with(
            FileStorage::new(path),
            SystemClock,
            &config.storage_key,
        ))
    };

    match &cli.command {
        Commands::Preview { fields } => {
            let draft = fields.to_form_input().validate()?;
            println!("{}", output::preview_text(&draft));
            println!("Preview ready. Run `passport-wall save` with the same fields to keep it.");
        }

        Commands::Save { fields, random } => {
            let input = if *random {
                random_form(&mut rand::thread_rng(), &ORIGINS)
            } else {
                fields.to_form_input()
            };
            let draft = input.validate()?;
            let mut store = open_store()?;
            let outcome = store.save(draft);
            println!("{}", output::preview_text(&outcome.record));
            println!("{}", output::save_message(&outcome.record.id, &outcome.status));
        }

        Commands::Random { save } => {
            let draft = random_form(&mut rand::thread_rng(), &ORIGINS).validate()?;
            println!("{}", output::preview_text(&draft));
            if *save {
                let mut store = open_store()?;
                let outcome = store.save(draft);
                println!("{}", output::save_message(&outcome.record.id, &outcome.status));
            }
        }

        Commands::List { format } => {
            let store = open_store()?;
            match format {
                OutputFormat::Text => print!("{}", output::wall_text(store.records(), &chrono::Local)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(store.records())?),
            }
            if store.retained_len() > 0 {
                eprintln!(
                    "⚠ {} stored entries could not be read; they are kept in the store file as-is.",
                    store.retained_len()
                );
            }
        }

        Commands::Show { id, format } => {
            let store = open_store()?;
            let record = store
                .get(id)
                .ok_or_else(|| PassportWallError::NotFound(id.clone()))?;
            match format {
                OutputFormat::Text => print!("{}", output::details_text(record)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
            }
        }

        Commands::Delete { id, yes } => {
            let mut store = open_store()?;
            if store.get(id).is_none() {
                println!("No passport with id {} on the wall.", id);
                return Ok(());
            }

            let confirmed = *yes
                || Confirm::new()
                    .with_prompt("Remove this passport from the wall?")
                    .default(false)
                    .interact()
                    .map_err(|e| PassportWallError::Prompt(e.to_string()))?;
            if !confirmed {
                return Ok(());
            }

            let outcome = store.delete(id);
            println!("{}", output::delete_message(id, &outcome.status));
        }

        Commands::Export { output, expanded } => {
            let store = open_store()?;
            export::export_wall_html(store.records(), output, *expanded)?;
            println!("✔ Exported wall to {} ({} passports)", output.display(), store.len());
        }

        Commands::Config { set_store, show } => {
            let mut config = config.clone();

            if let Some(path) = set_store {
                config.set_store_path(path.clone())?;
                println!("✔ Store file set to {}", path.display());
            }

            if *show {
                println!("Settings:");
                println!("  Store file:  {}", config.resolve_store_path(cli.store.as_deref())?.display());
                println!("  Storage key: {}", config.storage_key);
            }
        }
    }

    Ok(())
}
