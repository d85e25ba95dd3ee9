use std::panic::{self, PanicHookInfo};

use color_eyre::config::{HookBuilder, PanicHook};
use color_eyre::eyre::Result;

/// Installs the eyre report hook and a panic hook that records the report
/// in the log before handing off to the interactive reporter.
pub fn initialize_panic_handler() -> Result<()> {
    let (panic_hook, eyre_hook) = HookBuilder::default()
        .panic_section(format!(
            "This is a bug. Consider reporting it at {}",
            env!("CARGO_PKG_REPOSITORY")
        ))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .into_hooks();
    eyre_hook.install()?;

    panic::set_hook(Box::new(move |info| {
        let report = panic_hook.panic_report(info).to_string();
        tracing::error!(
            report = %strip_ansi_escapes::strip_str(&report),
            "page runtime panicked"
        );
        report_panic(&panic_hook, info);
        std::process::exit(libc::EXIT_FAILURE);
    }));
    Ok(())
}

#[cfg(not(debug_assertions))]
fn report_panic(panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    use human_panic::{handle_dump, print_msg, Metadata};

    let meta = Metadata::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        .authors(env!("CARGO_PKG_AUTHORS").replace(':', ", "))
        .homepage(env!("CARGO_PKG_HOMEPAGE"));
    let dump = handle_dump(&meta, info);
    if print_msg(dump, &meta).is_err() {
        eprintln!("{} crashed", env!("CARGO_PKG_NAME"));
    }
    eprintln!("{}", panic_hook.panic_report(info));
}

#[cfg(debug_assertions)]
fn report_panic(_panic_hook: &PanicHook, info: &PanicHookInfo<'_>) {
    better_panic::Settings::auto()
        .most_recent_first(false)
        .lineno_suffix(true)
        .verbosity(better_panic::Verbosity::Full)
        .create_panic_handler()(info);
}
