//! Single-date lookup and upsert.

use serde_json::json;

use super::{parse_date_arg, Context};

pub fn get(ctx: &Context, date: &str) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_date_arg(date)?;
    let (_, store) = ctx.open_store()?;
    let value = store.value_for_date(date);

    if ctx.json {
        println!("{}", json!({ "date": date, "value": value }));
    } else {
        match value {
            Some(v) => println!("{v}"),
            None => println!("no value for {date}"),
        }
    }
    Ok(())
}

pub fn set(ctx: &Context, date: &str, value: f64) -> Result<(), Box<dyn std::error::Error>> {
    let date = parse_date_arg(date)?;
    let (_, store) = ctx.open_store()?;
    let ack = store.upsert_value_for_date(date, value)?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&ack)?);
    } else {
        let verb = match ack.outcome {
            dayseries_core::UpsertOutcome::Inserted => "recorded",
            dayseries_core::UpsertOutcome::Updated => "updated",
        };
        println!("{verb} {} = {}", ack.date, ack.value);
        if !ack.persisted {
            eprintln!("warning: change kept in memory only; series file was not written");
        }
    }
    Ok(())
}
