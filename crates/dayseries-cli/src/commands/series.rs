use dayseries_core::WindowSize;

use super::Context;

pub fn run(ctx: &Context, window: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let (config, store) = ctx.open_store()?;
    let window = match window {
        Some(size) => WindowSize::new(size)?,
        None => config.smoothing.window_size,
    };
    let view = store.view(window);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if view.points.is_empty() {
        println!("no observations");
        return Ok(());
    }

    println!("{:<7} {:<12} {:>12} {:>12}", "day", "date", "value", format!("avg({window})"));
    for point in &view.points {
        println!(
            "{:<7} {:<12} {:>12.2} {:>12.2}",
            point.date_display,
            point.date.to_string(),
            point.value,
            point.avg
        );
    }
    if let (Some(min), Some(max)) = (view.min, view.max) {
        println!("range: {min:.2} .. {max:.2}");
    }
    Ok(())
}
