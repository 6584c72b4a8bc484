//! Command handlers. Each returns the text to print on stdout.

use anyhow::{bail, Context, Result};
use rulequote_core::{JobStatus, LineItem, QuoteInput};
use rulequote_service::Services;
use std::fmt::Write;
use std::path::Path;
use tracing::info;

use crate::cli::{QuoteArgs, TotalsArgs};

/// `rulequote totals`
pub fn totals(services: &Services, args: &TotalsArgs) -> Result<String> {
    let items: Vec<LineItem> = read_json(&args.items)?;
    let result = services.quotes.preview(&items, args.tier)?;

    if args.json {
        return Ok(serde_json::to_string_pretty(&result)?);
    }
    Ok(result.explanation.join("\n"))
}

/// `rulequote quote`
pub async fn quote(services: &Services, args: &QuoteArgs) -> Result<String> {
    let input: QuoteInput = read_json(&args.input)?;
    let quote = services.quotes.create(input).await?;
    let mut out = serde_json::to_string_pretty(&quote)?;

    if args.render {
        let job = services.documents.request(&quote.id).await?;
        let job = services.documents.process(&job.id).await?;

        match (job.status, job.file_path.as_deref()) {
            (JobStatus::Completed, Some(path)) => {
                info!(quote_id = %quote.id, path, "Quote document written");
                write!(out, "\nDocument: {}", path)?;
            }
            _ => bail!(
                "document job {} failed: {}",
                job.id,
                job.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    Ok(out)
}

/// `rulequote rules`
pub fn rules(services: &Services) -> Result<String> {
    let rules = services.rules.snapshot();
    Ok(toml::to_string_pretty(&*rules)?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulequote_core::CustomerTier;
    use rulequote_service::ServiceConfig;
    use std::path::PathBuf;

    fn services(dir: &Path) -> Services {
        let mut config = ServiceConfig::default();
        config.documents.output_dir = dir.join("docs");
        Services::from_config(&config).unwrap()
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_totals_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(
            dir.path(),
            "items.json",
            r#"[{"description":"Bulk","quantity":60,"unitPrice":"10.00"}]"#,
        );

        let out = totals(
            &services(dir.path()),
            &TotalsArgs {
                items,
                tier: CustomerTier::Standard,
                json: false,
            },
        )
        .unwrap();

        assert_eq!(
            out,
            "Subtotal: $600.00 (1 item)\n\
             Standard customer discount: 5% (applied for orders of $500.00 or more)\n\
             Tax (10% for standard customers): $57.00\n\
             Total: $627.00"
        );
    }

    #[test]
    fn test_totals_json_output() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(dir.path(), "items.json", "[]");

        let out = totals(
            &services(dir.path()),
            &TotalsArgs {
                items,
                tier: CustomerTier::Premium,
                json: true,
            },
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["total"], 0);
        assert_eq!(value["itemCount"], 0);
    }

    #[test]
    fn test_totals_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let items = write(dir.path(), "items.json", "not json");
        let err = totals(
            &services(dir.path()),
            &TotalsArgs {
                items,
                tier: CustomerTier::Standard,
                json: false,
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[tokio::test]
    async fn test_quote_with_render() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(
            dir.path(),
            "quote.json",
            r#"{
                "customerName": "Ada Lovelace",
                "customerEmail": "ada@example.com",
                "customerType": "premium",
                "items": [{"description":"Bulk","quantity":60,"unitPrice":10}]
            }"#,
        );

        let out = quote(&services(dir.path()), &QuoteArgs { input, render: true })
            .await
            .unwrap();

        assert!(out.contains("\"customerType\": \"premium\""));
        let doc_line = out.lines().last().unwrap();
        assert!(doc_line.starts_with("Document: "));
        let path = doc_line.trim_start_matches("Document: ");
        assert!(std::fs::read_to_string(path).unwrap().contains("Total: $583.20"));
    }

    #[tokio::test]
    async fn test_quote_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = write(
            dir.path(),
            "quote.json",
            r#"{"customerName":"","customerEmail":"ada@example.com","items":[]}"#,
        );
        let err = quote(&services(dir.path()), &QuoteArgs { input, render: false })
            .await
            .unwrap_err();
        assert!(err.to_string().contains("customerName is required"));
    }

    #[test]
    fn test_rules_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = rules(&services(dir.path())).unwrap();
        assert!(out.contains("[discounts.standard]"));
        assert!(out.contains("[tax_rates]"));
    }
}
