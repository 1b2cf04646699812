use crate::SuiteSummary;

pub fn render_summary(summary: &SuiteSummary) -> String {
    format!(
        "{}/{} outside of cosine similarity {}",
        summary.fail_count, summary.total_count, summary.threshold
    )
}

/// One line per trial, in trial order, then the summary line.
pub fn render_trials(summary: &SuiteSummary) -> String {
    let mut out = String::new();
    for o in &summary.outcomes {
        out.push_str(&format!(
            "{:>10}  n={:<4} cos={:.6}  λ₁={:<12.4} {}{}\n",
            o.kind.to_string(),
            o.samples,
            o.similarity,
            o.dominant_eigenvalue,
            if o.below_threshold { "FAIL" } else { "ok" },
            if o.degenerate { " (degenerate λ₁)" } else { "" }
        ));
    }
    out.push_str(&render_summary(summary));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TrialKind, TrialOutcome};

    fn summary() -> SuiteSummary {
        let outcome = |kind, similarity: f64, degenerate| TrialOutcome {
            kind,
            samples: 150,
            similarity,
            below_threshold: similarity < 0.95,
            dominant_eigenvalue: 9206.53,
            degenerate,
        };
        SuiteSummary {
            fail_count: 1,
            total_count: 2,
            threshold: 0.95,
            outcomes: vec![
                outcome(TrialKind::Reference, 0.98, false),
                outcome(TrialKind::Synthetic { seed: 1 }, 0.5, true),
            ],
        }
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            render_summary(&summary()),
            "1/2 outside of cosine similarity 0.95"
        );
    }

    #[test]
    fn test_trial_lines() {
        let text = render_trials(&summary());
        let lines: Vec<&str> = text.lines().collect();
        println!("{}", text);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("reference") && lines[0].ends_with("ok"));
        assert!(lines[1].contains("seed 1") && lines[1].contains("FAIL"));
        assert!(lines[1].contains("degenerate"));
        assert_eq!(lines[2], "1/2 outside of cosine similarity 0.95");
    }
}
