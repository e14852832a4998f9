use pz_optimizer::*;
use pz_types::*;

/// Synthetic evaluator with a quality peak near penalty 2.2, outlier 1.3.
/// A real deployment would run the segmentation backend here.
struct SyntheticDelayEvaluator;

impl Evaluator for SyntheticDelayEvaluator {
    fn evaluate(
        &self,
        table: &SampleTable,
        penalty: f64,
        outlier_penalty: f64,
        _sample_size_min: usize,
        _sample_size_max: usize,
        _concurrency_hint: usize,
    ) -> PzResult<Evaluation> {
        let distance = (penalty - 2.2).abs() + (outlier_penalty - 1.3).abs();
        let correct = (30.0 * table.len() as f64 / (1.0 + distance)).round() as u32;
        let wrong = (4.0 * table.len() as f64 * distance).round() as u32 + 1;
        Ok(Evaluation {
            label: FragmentFamily::Delay.label().to_string(),
            correct,
            wrong,
        })
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("PenZoom Basic Tuning Example");

    // Build a small sample table with the required columns
    let table = SampleTable::new()
        .with_column("ID", Column::Int(vec![1, 2, 3, 4, 5, 6]))?
        .with_column("position", Column::Int(vec![10, 35, 60, 85, 110, 135]))?
        .with_column(
            "strand",
            Column::Text(
                ["+", "+", "+", "-", "-", "-"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        )?
        .with_column(
            "position_segment",
            Column::Text(
                ["I_1", "I_1", "I_2", "I_2", "I_3", "I_3"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        )?;
    println!("Built sample table with {} rows", table.len());

    // Two refinement cycles over the default 9x9 windows
    let config = TunerConfig::new().with_cycles(2).with_concurrency(4);
    println!(
        "Searching penalty {}..{} and outlier {}..{} at resolution {}",
        config.penalty_axis.start,
        config.penalty_axis.end,
        config.outlier_axis.start,
        config.outlier_axis.end,
        config.penalty_axis.resolution,
    );

    let tuner = PenaltyTuner::new(config);
    let report = tuner.run(&table, &SyntheticDelayEvaluator, LogRecord::new())?;

    println!(
        "Winning pair: penalty {:.4}, outlier penalty {:.4}",
        report.winning_pair.penalty, report.winning_pair.outlier_penalty
    );

    for record in &report.cycles {
        println!(
            "  cycle {}: window {:.4}..{:.4} x {:.4}..{:.4}, {} cells evaluated, picked ({:.4}, {:.4})",
            record.cycle,
            record.correct.penalty_values()[0],
            record.correct.penalty_values()[record.correct.rows() - 1],
            record.correct.outlier_values()[0],
            record.correct.outlier_values()[record.correct.cols() - 1],
            record.correct.filled(),
            record.pick.penalty,
            record.pick.outlier_penalty,
        );
    }

    // The tuned pair lands in the caller's log record under the family label
    println!(
        "Log record: delay_penalty = {:?}, delay_outlier_penalty = {:?}",
        report.log_record.get("delay_penalty"),
        report.log_record.get("delay_outlier_penalty"),
    );

    Ok(())
}
