use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use mono_scan::scanners::bounded_subarray::{bounded_subarray_with_kernel, BoundedSubarrayInput, BoundedSubarrayParams};
use mono_scan::scanners::brackets::is_balanced;
use mono_scan::scanners::kmp::KmpMatcher;
use mono_scan::scanners::largest_rectangle::{largest_rectangle_with_kernel, LargestRectangleInput};
use mono_scan::scanners::next_greater::{next_greater_with_kernel, NextGreaterInput};
use mono_scan::scanners::rpn::eval_rpn;
use mono_scan::scanners::shortest_subarray::{
	shortest_subarray_with_kernel, ShortestSubarrayInput, ShortestSubarrayParams,
};
use mono_scan::scanners::sliding_max::{
	sliding_max_with_kernel, SlidingMaxBatchBuilder, SlidingMaxInput, SlidingMaxParams,
};
use mono_scan::utilities::data_loader::read_series_from_csv;
use mono_scan::utilities::enums::Kernel;
use serde_json::json;
use std::error::Error;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Monotonic stack and deque scanners", long_about = None)]
struct Cli {
	/// Print results as JSON
	#[arg(long, global = true)]
	json: bool,

	/// Kernel: auto, scalar or naive
	#[arg(long, global = true, default_value = "auto")]
	kernel: Kernel,

	#[command(subcommand)]
	command: Command,
}

#[derive(Args, Debug)]
struct SeriesArgs {
	/// CSV file with a header row of column names
	#[arg(long, conflicts_with = "values")]
	input: Option<String>,

	/// Column to read from --input
	#[arg(long, requires = "input")]
	column: Option<String>,

	/// Inline comma-separated values
	#[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
	values: Vec<i64>,
}

impl SeriesArgs {
	fn load(&self, default_column: &str) -> Result<Vec<i64>, Box<dyn Error>> {
		if let Some(path) = &self.input {
			let series = read_series_from_csv(path)?;
			let column = self.column.as_deref().unwrap_or(default_column);
			log::debug!("loaded {} rows from {}, using column {}", series.len(), path, column);
			return Ok(series.column(column)?.to_vec());
		}
		if self.values.is_empty() {
			return Err("either --input or --values is required".into());
		}
		Ok(self.values.clone())
	}
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Largest rectangle under a histogram
	Rectangle {
		#[command(flatten)]
		series: SeriesArgs,
	},
	/// Maximum of every sliding window
	WindowMax {
		#[command(flatten)]
		series: SeriesArgs,
		/// Window width
		#[arg(long, short = 'k', default_value_t = 3)]
		window: usize,
		/// Sweep window widths instead: START,END,STEP
		#[arg(long, value_delimiter = ',', conflicts_with = "window")]
		sweep: Option<Vec<usize>>,
	},
	/// Steps until a strictly greater value
	NextGreater {
		#[command(flatten)]
		series: SeriesArgs,
	},
	/// Shortest run with sum at least TARGET
	Shortest {
		#[command(flatten)]
		series: SeriesArgs,
		#[arg(long)]
		target: i64,
	},
	/// Longest run whose max - min stays within LIMIT
	Bounded {
		#[command(flatten)]
		series: SeriesArgs,
		#[arg(long, default_value_t = 0)]
		limit: i64,
	},
	/// Evaluate a Reverse Polish Notation expression
	Rpn {
		#[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
		tokens: Vec<String>,
	},
	/// Check bracket balance
	Balanced { text: String },
	/// Find every occurrence of NEEDLE in HAYSTACK
	Find { haystack: String, needle: String },
}

struct Report {
	text: String,
	json: serde_json::Value,
}

fn run(cli: &Cli) -> Result<Report, Box<dyn Error>> {
	let kernel = cli.kernel;
	let report = match &cli.command {
		Command::Rectangle { series } => {
			let data = series.load("heights")?;
			let out = largest_rectangle_with_kernel(&LargestRectangleInput::from_slice(&data), kernel)?;
			let text = match out.span {
				Some(s) => format!("{} (bars {}..={}, height {})", out.area, s.start, s.end, s.height),
				None => out.area.to_string(),
			};
			Report {
				text,
				json: serde_json::to_value(&out)?,
			}
		}
		Command::WindowMax { series, window, sweep } => {
			let data = series.load("samples")?;
			match sweep.as_deref() {
				Some(&[start, end, step]) => {
					let batch_kernel = match kernel {
						Kernel::Scalar => Kernel::ScalarBatch,
						Kernel::Naive => Kernel::NaiveBatch,
						other => other,
					};
					let out = SlidingMaxBatchBuilder::new()
						.kernel(batch_kernel)
						.window_range(start, end, step)
						.apply_slice(&data)?;
					let mut text = String::new();
					for combo in &out.combos {
						let row = out.values_for(combo).unwrap_or(&[]);
						let cells: Vec<String> = row
							.iter()
							.map(|v| v.map_or_else(|| "-".to_string(), |x| x.to_string()))
							.collect();
						text.push_str(&format!("k={}: {}\n", combo.window.unwrap_or_default(), cells.join(" ")));
					}
					Report {
						text: text.trim_end().to_string(),
						json: serde_json::to_value(&out)?,
					}
				}
				Some(other) => return Err(format!("--sweep takes START,END,STEP, got {:?}", other).into()),
				None => {
					let params = SlidingMaxParams { window: Some(*window) };
					let out = sliding_max_with_kernel(&SlidingMaxInput::from_slice(&data, params), kernel)?;
					Report {
						text: join(&out.values),
						json: serde_json::to_value(&out)?,
					}
				}
			}
		}
		Command::NextGreater { series } => {
			let data = series.load("temps")?;
			let out = next_greater_with_kernel(&NextGreaterInput::from_slice(&data), kernel)?;
			Report {
				text: join(&out.distances),
				json: serde_json::to_value(&out)?,
			}
		}
		Command::Shortest { series, target } => {
			let data = series.load("samples")?;
			let params = ShortestSubarrayParams { target: *target };
			let out = shortest_subarray_with_kernel(&ShortestSubarrayInput::from_slice(&data, params), kernel)?;
			Report {
				text: out.length.map_or_else(|| "none".to_string(), |l| l.to_string()),
				json: serde_json::to_value(&out)?,
			}
		}
		Command::Bounded { series, limit } => {
			let data = series.load("samples")?;
			let params = BoundedSubarrayParams { limit: Some(*limit) };
			let out = bounded_subarray_with_kernel(&BoundedSubarrayInput::from_slice(&data, params), kernel)?;
			let text = match out.start {
				Some(start) => format!("{} (from index {})", out.length, start),
				None => out.length.to_string(),
			};
			Report {
				text,
				json: serde_json::to_value(&out)?,
			}
		}
		Command::Rpn { tokens } => {
			let value = eval_rpn(tokens.as_slice())?;
			Report {
				text: value.to_string(),
				json: json!({ "value": value }),
			}
		}
		Command::Balanced { text } => {
			let balanced = is_balanced(text);
			Report {
				text: balanced.to_string(),
				json: json!({ "balanced": balanced }),
			}
		}
		Command::Find { haystack, needle } => {
			let hits = KmpMatcher::new(needle.as_bytes()).find_all(haystack.as_bytes());
			Report {
				text: join(&hits),
				json: json!({ "matches": hits }),
			}
		}
	};
	Ok(report)
}

fn join<T: ToString>(values: &[T]) -> String {
	values.iter().map(T::to_string).collect::<Vec<_>>().join(" ")
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
	let cli = Cli::parse();
	log::debug!("{:?}", cli);

	match run(&cli) {
		Ok(report) => {
			if cli.json {
				println!("{}", report.json);
			} else {
				println!("{}", report.text);
			}
			ExitCode::SUCCESS
		}
		Err(e) => {
			eprintln!("error: {}", e);
			ExitCode::FAILURE
		}
	}
}
