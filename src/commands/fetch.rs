use crate::api::{Filter, Profile};
use crate::error::{Error, Result};
use crate::fetch::{ClientKind, Fetched, HttpFetcher, Outcome, Target};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use serde::Serialize;

pub fn run(api_url: &str, filter: Filter, target: Target, json: bool) -> Result<()> {
    let fetcher = HttpFetcher::over_http(api_url)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let fetched = runtime.block_on(fetcher.run(target, &filter))?;

    if json {
        print_json(&filter, &fetched)?;
    } else {
        print_tables(&filter, &fetched);
    }

    Ok(())
}

/// Sections to print, in path order.
fn paths(fetched: &Fetched) -> Vec<(ClientKind, &Outcome)> {
    match fetched {
        Fetched::Single { kind, outcome } => vec![(*kind, outcome)],
        Fetched::Pair { reqwest, ureq } => vec![
            (ClientKind::Reqwest, reqwest),
            (ClientKind::Ureq, ureq),
        ],
    }
}

fn print_tables(filter: &Filter, fetched: &Fetched) {
    println!(
        "# gender: {} | country: {}",
        filter.gender.label(),
        filter.country
    );

    for (kind, outcome) in paths(fetched) {
        println!();
        println!("{} ({})", kind.label(), outcome.elapsed_label());

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Name", "Email", "Age", "Location", "Nat"]);

        for profile in &outcome.profiles {
            table.add_row(vec![
                profile.name.full(),
                profile.email.clone(),
                profile.dob.age.to_string(),
                format!("{}, {}", profile.location.city, profile.location.country),
                profile.nat.clone(),
            ]);
        }

        println!("{table}");
    }
}

#[derive(Serialize)]
struct Report<'a> {
    gender: &'a str,
    country: &'a str,
    paths: Vec<PathReport<'a>>,
}

#[derive(Serialize)]
struct PathReport<'a> {
    via: &'static str,
    elapsed_ms: f64,
    profiles: &'a [Profile],
}

fn print_json(filter: &Filter, fetched: &Fetched) -> Result<()> {
    let report = Report {
        gender: filter.gender.label(),
        country: &filter.country,
        paths: paths(fetched)
            .into_iter()
            .map(|(kind, outcome)| PathReport {
                via: kind.label(),
                elapsed_ms: outcome.elapsed.as_secs_f64() * 1000.0,
                profiles: &outcome.profiles,
            })
            .collect(),
    };

    let rendered = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::Unexpected(format!("JSON report encoding failed: {e}")))?;
    println!("{rendered}");
    Ok(())
}
