use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Embedded target the library must keep building for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

/// One `cargo` invocation in the check pipeline.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
    /// A failing advisory step is reported but does not abort the run.
    advisory: bool,
}

const STEPS: &[Step] = &[
    Step {
        label: "no_std build (bare)",
        args: &[
            "check",
            "-p",
            "debounce",
            "--target",
            EMBEDDED_TARGET,
            "--no-default-features",
        ],
        advisory: false,
    },
    Step {
        label: "no_std build (defmt)",
        args: &[
            "check",
            "-p",
            "debounce",
            "--target",
            EMBEDDED_TARGET,
            "--no-default-features",
            "--features",
            "defmt",
        ],
        advisory: false,
    },
    Step {
        label: "host build (std, tracing)",
        args: &["check", "-p", "debounce", "--features", "std,tracing"],
        advisory: false,
    },
    Step {
        label: "clippy",
        args: &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--features",
            "debounce/std,debounce/tracing",
            "--",
            "-D",
            "warnings",
        ],
        advisory: true,
    },
    Step {
        label: "formatting",
        args: &["fmt", "--all", "--check"],
        advisory: true,
    },
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking debounce builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for step in STEPS {
        println!("{}", format!("  Checking {}...", step.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(step.args)
            .output()
            .with_context(|| format!("Failed to run {}", step.label))?;

        if output.status.success() {
            println!(
                "{}",
                format!(
                    "  ✓ {} passed in {:.2}s",
                    step.label,
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
        } else if step.advisory {
            eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        } else {
            eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
            eprintln!();
            eprintln!("{}", String::from_utf8_lossy(&output.stderr));
            anyhow::bail!("{} failed", step.label);
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}
