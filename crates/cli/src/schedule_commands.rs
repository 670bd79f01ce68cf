//! `emberdash schedule` subcommands: inspect and poke the burn scheduler
//! without going through the HTTP API.

use clap::Subcommand;

use {
    emberdash_burn::schedule::{day_name, format_until},
    emberdash_config::EmberdashConfig,
    emberdash_gateway::server::build_state,
};

#[derive(Subcommand)]
pub enum ScheduleAction {
    /// Print the current schedule.
    Show,
    /// Print recent firings, newest first.
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Perform one due-check cycle now.
    Run,
}

pub async fn run(config: &EmberdashConfig, action: ScheduleAction) -> anyhow::Result<()> {
    let state = build_state(config);

    match action {
        ScheduleAction::Show => {
            let schedule = state.burn.config().await?;
            let status = state.burn.status().await?;
            println!("{}", serde_json::to_string_pretty(&schedule)?);
            println!(
                "next: {} {} (in {})",
                day_name(schedule.day_of_week),
                schedule.time_of_day,
                format_until(status.ms_until_next),
            );
        },
        ScheduleAction::History { limit } => {
            let records = state.burn.history(limit).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        },
        ScheduleAction::Run => {
            let executed = state.burn.run_due_check_once().await?;
            println!("executed: {executed}");
        },
    }
    Ok(())
}
