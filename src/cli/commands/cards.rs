//! Cards command: list the project card vocabulary

use super::shared::CommandStats;
use crate::app::models::{Card, ValueType};
use crate::app::services::card_registry::all_cards;
use crate::cli::args::{CardsArgs, OutputFormat};
use anyhow::Context;
use colored::*;
use std::time::Instant;

/// Print the registered cards, optionally filtered by value type
pub fn run_cards(args: CardsArgs) -> anyhow::Result<CommandStats> {
    let start_time = Instant::now();
    let cards = select_cards(args.value_type.as_deref())?;

    match args.output_format {
        OutputFormat::Human => {
            for card in &cards {
                println!("{:<25}{}", card.name, card.value_type.to_string().dimmed());
            }
            println!("{}", format!("{} cards", cards.len()).bold());
        }
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&cards).context("Failed to serialize cards")?
        ),
    }

    Ok(CommandStats {
        processing_time: start_time.elapsed(),
        ..CommandStats::default()
    })
}

/// Registered cards whose type matches `value_type`, all of them without one
pub fn select_cards(value_type: Option<&str>) -> crate::Result<Vec<&'static Card>> {
    let wanted = value_type.map(str::parse::<ValueType>).transpose()?;
    Ok(all_cards()
        .iter()
        .filter(|card| wanted.is_none_or(|vt| card.value_type == vt))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_cards() {
        assert_eq!(select_cards(None).unwrap().len(), all_cards().len());
    }

    #[test]
    fn test_select_path_cards() {
        let cards = select_cards(Some("path")).unwrap();
        assert!(!cards.is_empty());
        assert!(cards.iter().all(|c| c.is_path()));
        assert!(cards.iter().any(|c| c.name == "PRECIP_FILE"));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let error = select_cards(Some("COLOUR")).unwrap_err();
        assert!(error.to_string().contains("COLOUR"));
    }
}
