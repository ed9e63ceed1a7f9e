use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tvae::{read_csv, write_csv, Tvae, TvaeConfig};

#[derive(Parser)]
#[command(name = "tvae_cli", version, about = "표 데이터 TVAE 합성기 CLI 도구")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// CSV로 모델 학습 후 저장
    Fit(FitArgs),
    /// 저장된 모델에서 합성 행 생성
    Sample(SampleArgs),
}

#[derive(Args)]
struct FitArgs {
    /// 학습 데이터 CSV (헤더 필수)
    data: PathBuf,
    /// 범주형으로 취급할 컬럼 (쉼표 구분)
    #[arg(long, value_delimiter = ',')]
    discrete: Vec<String>,
    #[arg(long, default_value_t = 300)]
    epochs: usize,
    #[arg(long = "batch-size", default_value_t = 500)]
    batch_size: usize,
    /// JSON 구성 파일 (epochs/batch-size 옵션보다 우선)
    #[arg(long)]
    config: Option<PathBuf>,
    /// 모델 출력 경로
    #[arg(long, short)]
    output: PathBuf,
    /// 스텝별 손실 CSV 출력 경로
    #[arg(long = "loss-output")]
    loss_output: Option<PathBuf>,
    #[arg(long)]
    verbose: bool,
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct SampleArgs {
    /// 저장된 모델 경로
    model: PathBuf,
    #[arg(long = "num-rows", short = 'n')]
    num_rows: usize,
    #[arg(long, short)]
    output: PathBuf,
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Fit(args) => handle_fit(args),
        Commands::Sample(args) => handle_sample(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<()> {
    let table = read_csv(&args.data).with_context(|| format!("{} 읽기 실패", args.data.display()))?;
    if table.n_rows() == 0 {
        bail!("{}에 데이터 행이 없습니다", args.data.display());
    }

    let config = fit_config(&args)?;

    println!("🧮 TVAE 학습 시작:");
    println!("   입력: {:?} ({} 행 × {} 컬럼)", args.data, table.n_rows(), table.n_columns());
    println!("   이산 컬럼: {:?}", args.discrete);
    println!("   에포크: {}, 배치: {}", config.epochs, config.batch_size);

    let mut model = Tvae::new(config)?;
    if let Some(seed) = args.seed {
        model.set_random_state(seed);
    }

    let discrete: Vec<&str> = args.discrete.iter().map(String::as_str).collect();
    model.fit(&table, &discrete).context("모델 학습 실패")?;
    model
        .save(&args.output)
        .with_context(|| format!("{} 저장 실패", args.output.display()))?;

    if let Some(path) = &args.loss_output {
        let file = File::create(path).with_context(|| format!("{} 생성 실패", path.display()))?;
        model.loss_history().write_csv(BufWriter::new(file))?;
    }

    if let Some(last) = model.loss_values().last() {
        println!("✅ 학습 완료: 최종 손실 {:.3}", last.loss);
    }
    println!("   모델: {:?}", args.output);
    Ok(())
}

/// JSON 구성 파일이 있으면 그것을, 없으면 명령행 옵션을 사용. `--verbose`는 켜기만 한다
fn fit_config(args: &FitArgs) -> Result<TvaeConfig> {
    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("{} 읽기 실패", path.display()))?;
            TvaeConfig::from_json_str(&json)?
        }
        None => TvaeConfig::new()
            .with_epochs(args.epochs)
            .with_batch_size(args.batch_size),
    };
    let verbose = config.verbose || args.verbose;
    Ok(config.with_verbose(verbose))
}

fn handle_sample(args: SampleArgs) -> Result<()> {
    let mut model = Tvae::load(&args.model).with_context(|| format!("{} 불러오기 실패", args.model.display()))?;
    if let Some(seed) = args.seed {
        model.set_random_state(seed);
    }

    let synthetic = model.sample(args.num_rows).context("샘플링 실패")?;
    write_csv(&synthetic, &args.output).with_context(|| format!("{} 쓰기 실패", args.output.display()))?;

    println!("✅ {} 행 생성: {:?}", synthetic.n_rows(), args.output);
    Ok(())
}
