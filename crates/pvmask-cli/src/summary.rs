use console::Style;
use pvmask_core::fusion::{FusionConfig, FusionPath, FusionReport, GuardDecision, Refinement};
use pvmask_core::mask::{max_label, positive_count};
use pvmask_core::threshold::ThresholdKind;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    warning: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            warning: Style::new().yellow().bold(),
        }
    }
}

pub fn print_fusion_summary(report: &FusionReport, config: &FusionConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("PV Mask Fusion"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(14)));
    println!();

    match &report.path {
        FusionPath::Fresh { new } => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Mode"),
                s.method.apply_to("new mask only")
            );
            println!();
            print_refinement(&s, "New Mask", new);
        }
        FusionPath::WithPrior {
            old,
            diff_mask,
            diff,
        } => {
            println!(
                "  {:<14}{}",
                s.label.apply_to("Mode"),
                s.method.apply_to("fuse with prior mask")
            );
            match config.retention_ratio {
                Some(ratio) if ratio > 0.0 => println!(
                    "  {:<14}{}",
                    s.label.apply_to("Guard"),
                    s.value.apply_to(format!("{:.0}%", ratio * 100.0))
                ),
                _ => println!(
                    "  {:<14}{}",
                    s.label.apply_to("Guard"),
                    s.disabled.apply_to("disabled")
                ),
            }
            println!();
            print_refinement(&s, "Old Mask", old);
            println!(
                "  {}",
                s.header.apply_to(format!(
                    "Difference ({} px)",
                    positive_count(diff_mask)
                ))
            );
            print_refinement_body(&s, diff);
        }
    }

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Pixels"),
        s.value.apply_to(report.positive_pixels())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Label"),
        s.value.apply_to(max_label(&report.final_mask))
    );
    if report.cleaned {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Cleanup"),
            s.value
                .apply_to(format!("regions <= {} px removed", config.cleanup.max_area))
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Cleanup"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();
}

fn print_refinement(s: &Styles, title: &str, refinement: &Refinement) {
    println!("  {}", s.header.apply_to(title));
    print_refinement_body(s, refinement);
}

fn print_refinement_body(s: &Styles, refinement: &Refinement) {
    let threshold = &refinement.threshold;
    match threshold.kind {
        ThresholdKind::Valley { .. } => println!(
            "    {:<12}{}",
            s.label.apply_to("Threshold"),
            s.value.apply_to(format!("{:.4} (valley)", threshold.value))
        ),
        ThresholdKind::Fallback { peaks_found } => println!(
            "    {:<12}{}",
            s.label.apply_to("Threshold"),
            s.warning.apply_to(format!(
                "{:.4} (mean fallback, {} peak(s))",
                threshold.value, peaks_found
            ))
        ),
    }

    match refinement.guard {
        GuardDecision::NotApplied => {}
        GuardDecision::Accepted { retained } => println!(
            "    {:<12}{}",
            s.label.apply_to("Retained"),
            s.method.apply_to(format!("{:.0}% (accepted)", retained * 100.0))
        ),
        GuardDecision::Rejected { retained } => println!(
            "    {:<12}{}",
            s.label.apply_to("Retained"),
            s.warning
                .apply_to(format!("{:.0}% (rejected, prior kept)", retained * 100.0))
        ),
    }

    println!(
        "    {:<12}{}",
        s.label.apply_to("Pixels"),
        s.value.apply_to(positive_count(&refinement.mask))
    );
    println!();
}
