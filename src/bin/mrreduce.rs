use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Builder;

use localreduce::apps::{inverted_index_reduce, word_count_reduce};
use localreduce::closure_mr::ClosureReducer;
use localreduce::controller::MRController;
use localreduce::formats::util::{reduce_output_name, PartitionFormat};
use localreduce::parameters::MRParameters;
use localreduce::{Reducer, ReducePartition, ReduceStats};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum App {
    /// Word count: sums the counts of every word
    Wc,
    /// Inverted index: lists the documents of every word
    Ii,
}

#[derive(Parser, Debug)]
#[command(about = "Runs the reduce phase of a mapreduce job over its intermediate partitions")]
struct Args {
    /// JSON file with job parameters; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
    /// Job name, as used in the partition file names
    #[arg(long)]
    job: Option<String>,
    /// Reduce task to run (ignored with --all)
    #[arg(long, default_value_t = 0)]
    reduce_task: usize,
    /// Number of map tasks whose partitions are read
    #[arg(long)]
    map_tasks: Option<usize>,
    /// Number of reduce tasks of the job (used with --all)
    #[arg(long)]
    reduce_tasks: Option<usize>,
    /// Directory holding the partitions
    #[arg(long)]
    work_dir: Option<PathBuf>,
    /// Output file (default: <work dir>/mrtmp.<job>-res-<reduce task>)
    #[arg(long, conflicts_with = "all")]
    output: Option<PathBuf>,
    /// Partition encoding: json or writelog
    #[arg(long)]
    format: Option<PartitionFormat>,
    /// Reduce function
    #[arg(long, value_enum, default_value_t = App::Wc)]
    app: App,
    /// Run all reduce tasks in parallel
    #[arg(long)]
    all: bool,
    /// Keep the partitions after a successful --all run (the default)
    #[arg(long)]
    keep_temp_files: bool,
    /// Remove the partitions after a successful --all run
    #[arg(long, conflicts_with = "keep_temp_files")]
    remove_temp_files: bool,
}

fn params_from(args: &Args) -> Result<MRParameters> {
    let mut params = match args.config {
        Some(ref path) => MRParameters::load(path)?,
        None => MRParameters::new(),
    };
    if let Some(ref job) = args.job {
        params = params.set_job_name(job.clone());
    }
    let mappers = args.map_tasks.unwrap_or(params.mappers);
    let reducers = args.reduce_tasks.unwrap_or(params.reducers);
    params = params.set_concurrency(mappers, reducers);
    if let Some(ref dir) = args.work_dir {
        params = params.set_work_dir(dir.clone());
    }
    if let Some(format) = args.format {
        params = params.set_format(format);
    }
    if args.keep_temp_files {
        params = params.set_keep_temp_files(true);
    } else if args.remove_temp_files {
        params = params.set_keep_temp_files(false);
    }
    Ok(params.set_shard_id(args.reduce_task))
}

fn run<R: Reducer + Sync>(args: &Args, params: MRParameters, reducer: &R)
                          -> Result<Vec<ReduceStats>> {
    if args.all {
        let job = params.job_name.clone();
        return MRController::run(reducer, params)
            .with_context(|| format!("reduce phase of job {}", job));
    }
    let shard = params.shard_id;
    let output = args.output.clone().unwrap_or_else(|| reduce_output_name(&params));
    let stats = ReducePartition::new(reducer, params)
        .run(&output)
        .with_context(|| format!("reduce task {}", shard))?;
    Ok(vec![stats])
}

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let args = Args::parse();
    let result = params_from(&args).and_then(|params| match args.app {
        App::Wc => run(&args, params, &word_count_reduce),
        App::Ii => run(&args, params, &ClosureReducer::new(inverted_index_reduce)),
    });

    match result {
        Ok(stats) => {
            for s in stats {
                println!("reduce task {}: {} partitions, {} records, {} keys, {} bytes in {}",
                         s.shard,
                         s.partitions_read,
                         s.records_read,
                         s.distinct_keys,
                         s.bytes_written,
                         s.elapsed);
            }
        }
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}
