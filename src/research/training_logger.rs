use colored::Colorize;

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::time::Instant;
use std::ops::ControlFlow;

use crate::error::Result;
use crate::learner::OnlineLearner;
use crate::scorer::LinearModel;

const DEFAULT_ROUND: usize = 1;
const DEFAULT_TIMELIMIT_MILLIS: u128 = u128::MAX;
const WIDTH: usize = 8;
const PREC_WIDTH: usize = 5;
const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;
const HEADER: &str = "Iteration,AverageLoss,Mistakes,Time\n";


/// Struct `TrainingLogger` runs an online learner
/// and logs the average loss, the number of mistakes,
/// and the running time of every pass.
///
/// # Example
/// ```no_run
/// use miniattach::prelude::*;
/// use miniattach::research::TrainingLogger;
///
/// # fn run(dpacks: &[DataPack]) -> miniattach::Result<()> {
/// let learner = StructuredPerceptron::init(dpacks, MstDecoder::init())
///     .iterations(10);
/// let mut logger = TrainingLogger::new(learner)
///     .print_every(2)
///     .time_limit_as_secs(60);
/// let model = logger.run("training.csv")?;
/// # Ok(())
/// # }
/// ```
pub struct TrainingLogger<L> {
    learner: L,
    time_limit: u128,
    round: usize,
}


impl<L> TrainingLogger<L> {
    /// Create a new instance of `TrainingLogger`.
    pub fn new(learner: L) -> Self {
        Self {
            learner,
            time_limit: DEFAULT_TIMELIMIT_MILLIS,
            round: DEFAULT_ROUND,
        }
    }


    /// Set the time limit for the learner as milliseconds.
    /// If the learner reaches this limit,
    /// breaks after the current pass.
    #[inline(always)]
    pub fn time_limit_as_millis(mut self, time_limit: u128) -> Self {
        self.time_limit = time_limit;
        self
    }


    /// Set the time limit for the learner as seconds.
    #[inline(always)]
    pub fn time_limit_as_secs(mut self, time_limit: u64) -> Self {
        self.time_limit = (time_limit as u128).saturating_mul(1_000_u128);
        self
    }


    /// Set the interval to print the current status.
    /// By default, the method `run` prints its status every pass.
    /// If you don't want to print the log,
    /// set `usize::MAX`.
    #[inline(always)]
    pub fn print_every(mut self, round: usize) -> Self {
        self.round = round.max(1);
        self
    }


    /// Returns the wrapped learner.
    pub fn into_inner(self) -> L {
        self.learner
    }
}


impl<L> TrainingLogger<L>
    where L: OnlineLearner,
{
    #[inline(always)]
    fn print_log_header(&self) {
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}",
            "".bold().red(),
            "AVG.".bold().blue(),
            "".bold().green(),
            "ACC.".bold().cyan(),
        );
        println!(
            "      {:>WIDTH$}\t\t{:>WIDTH$}\t{:>WIDTH$}\t{:>WIDTH$}\n",
            "ITER".bold().red(),
            "LOSS".bold().blue(),
            "MISTAKES".bold().green(),
            "TIME".bold().cyan(),
        );
    }


    /// print current settings.
    #[inline(always)]
    fn print_stats(&self) {
        let limit = if self.time_limit != u128::MAX {
            time_format(self.time_limit)
        } else {
            "Nothing".into()
        };
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Learner".bold(),
            self.learner.name().bold().green(),
        );

        if let Some(info) = self.learner.info() {
            let line = info.into_iter()
                .map(|(key, val)| {
                    format!(
                        "    + {:<STAT_WIDTH$}\t{:>width$}",
                        key,
                        val.bold().yellow(),
                        width = STAT_WIDTH - 8
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            println!("{line}");
        }

        println!(
            "\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}\n\
            {:=^FULL_WIDTH$}\n\
            ",
            "Time Limit".bold(),
            limit.bold().green(),
            "".bold(),
        );
    }


    /// Run the learner with logging.
    /// This method is almost the same as `OnlineLearner::run`,
    /// but writes one CSV line per pass to `filename`.
    pub fn run<P: AsRef<Path>>(&mut self, filename: P) -> Result<LinearModel> {
        let mut file = File::create(filename)?;
        file.write_all(HEADER.as_bytes())?;

        // ---------------------------------------------------------------------
        // Pre-processing
        self.learner.preprocess()?;
        let verbose = self.round != usize::MAX;
        if verbose {
            self.print_stats();
            self.print_log_header();
        }

        let mut time_acc = 0;

        // ---------------------------------------------------------------------
        // Training step
        for iter in 1.. {
            let now = Instant::now();
            let flow = self.learner.iterate(iter)?;
            time_acc += now.elapsed().as_millis();

            let (loss, mistakes) = self.learner.history()
                .last()
                .map(|s| (s.average_loss, s.mistakes))
                .unwrap_or((0f64, 0));

            let line = format!("{iter},{loss},{mistakes},{time_acc}\n");
            file.write_all(line.as_bytes())?;

            if time_acc > self.time_limit {
                println!(
                    "{} {}\t\t{}\t{}\t{}\n",
                    "[TLE]".bold().bright_red(),
                    format!("{:>WIDTH$}", iter).bold().red(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", loss).bold().blue(),
                    format!("{:>WIDTH$}", mistakes).bold().green(),
                    time_format(time_acc).bold().cyan(),
                );
                break;
            }

            if verbose && iter % self.round == 0 {
                println!(
                    "{} {}\t\t{}\t{}\t{}",
                    "[LOG]".bold().magenta(),
                    format!("{:>WIDTH$}", iter).red(),
                    format!("{:>WIDTH$.PREC_WIDTH$}", loss).blue(),
                    format!("{:>WIDTH$}", mistakes).green(),
                    time_format(time_acc).bold().cyan(),
                );
            }

            if let ControlFlow::Break(_) = flow {
                if verbose {
                    println!(
                        "{} {}\t\t{}\t{}\t{}\n",
                        "[FIN]".bold().bright_green(),
                        format!("{:>WIDTH$}", iter).red(),
                        format!("{:>WIDTH$.PREC_WIDTH$}", loss).bold().blue(),
                        format!("{:>WIDTH$}", mistakes).bold().green(),
                        time_format(time_acc).bold().cyan(),
                    );
                }
                break;
            }
        }

        self.learner.postprocess()
    }
}


fn time_format(millisec: u128) -> String {
    if millisec < 1_000 {
        return format!("  0.{:0>3}s", millisec);
    }
    let sec = millisec / 1_000;
    let millisec = millisec % 1_000;
    if sec < 60 {
        return format!(" {:0>2}.{:0>3}s", sec, millisec);
    }
    let min = sec / 60;
    let sec = sec % 60;
    if min < 60 {
        return format!(" {:0>2}m {:0>2}s", min, sec);
    }
    let hours = min / 60;
    let min = min % 60;
    format!(" {:0>2}h {:0>2}m", hours, min)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_format() {
        assert_eq!(time_format(42), "  0.042s");
        assert_eq!(time_format(12_345), " 12.345s");
        assert_eq!(time_format(61_000), " 01m 01s");
        assert_eq!(time_format(3_660_000), " 01h 01m");
    }
}
