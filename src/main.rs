//! Headless soak driver (default binary).
//!
//! Plays a scripted or seeded-random action stream on one board or a versus
//! pair for a fixed number of frames, then prints the final boards as ASCII
//! or JSON. Nothing is rendered while it runs.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;

use tetrad::core::{
    parse_script, BoardConfig, FrameDriver, GameBoard, PlayerSide, SimpleRng, Versus,
};
use tetrad::types::{GameAction, FRAME_MS, LOCK_DELAY_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    Ascii,
    Json,
}

/// tetrad - headless soak run of the block engine
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Randomizer seed (the opponent uses seed + 1)
    #[arg(short, long, default_value_t = 1)]
    seed: u32,

    /// Frames to run
    #[arg(short, long, default_value_t = 3600)]
    frames: u32,

    /// Play a linked versus pair instead of a single board
    #[arg(long)]
    versus: bool,

    /// Comma-separated actions, replayed in a loop (random input if absent)
    #[arg(long)]
    script: Option<String>,

    /// Frames between input actions
    #[arg(long, default_value_t = 6)]
    every: u32,

    /// Lock delay in milliseconds
    #[arg(long, default_value_t = LOCK_DELAY_MS)]
    lock_delay_ms: u32,

    /// Frame period in milliseconds
    #[arg(long, default_value_t = FRAME_MS)]
    frame_ms: u32,

    /// Output format for the final state
    #[arg(short, long, value_enum, default_value_t = Output::Ascii)]
    output: Output,
}

/// Gameplay actions random input picks from
const RANDOM_ACTIONS: [GameAction; 8] = [
    GameAction::MoveLeft,
    GameAction::MoveRight,
    GameAction::RotateLeft,
    GameAction::RotateRight,
    GameAction::Hold,
    GameAction::HardDrop,
    GameAction::SoftDropOn,
    GameAction::SoftDropOff,
];

/// Where the next input action comes from
enum Input {
    Script { actions: Vec<GameAction>, next: usize },
    Random(SimpleRng),
}

impl Input {
    fn new(script: Option<&str>, seed: u32) -> Result<Self> {
        match script {
            Some(script) => {
                let actions = parse_script(script).context("invalid --script")?;
                anyhow::ensure!(!actions.is_empty(), "--script has no actions");
                Ok(Input::Script { actions, next: 0 })
            }
            None => Ok(Input::Random(SimpleRng::new(seed ^ 0x9E37_79B9))),
        }
    }

    fn next_action(&mut self) -> GameAction {
        match self {
            Input::Script { actions, next } => {
                let action = actions[*next % actions.len()];
                *next += 1;
                action
            }
            Input::Random(rng) => {
                RANDOM_ACTIONS[rng.next_range(RANDOM_ACTIONS.len() as u32) as usize]
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    let config = BoardConfig::new()
        .with_seed(args.seed)
        .with_lock_delay_ms(args.lock_delay_ms)
        .with_frame_ms(args.frame_ms);
    config.validate()?;

    if args.versus {
        run_versus(&args, config)
    } else {
        run_single(&args, config)
    }
}

fn is_input_frame(frame: u32, every: u32) -> bool {
    every > 0 && frame % every == 0
}

fn run_single(args: &Args, config: BoardConfig) -> Result<()> {
    let mut board = GameBoard::with_config(config)?;
    let mut driver = FrameDriver::new();
    let mut input = Input::new(args.script.as_deref(), args.seed)?;
    board.start();

    let mut played = 0;
    for frame in 0..args.frames {
        if !board.is_running() {
            break;
        }
        if is_input_frame(frame, args.every) {
            board.apply_action(input.next_action());
        }
        driver.frame(&mut board);
        played += 1;
    }

    info!(
        frames = played,
        score = board.score(),
        level = board.level(),
        lines = board.lines(),
        "soak finished"
    );

    match args.output {
        Output::Ascii => {
            println!("{}", board.grid());
            println!(
                "score {}  level {}  lines {}  running {}",
                board.score(),
                board.level(),
                board.lines(),
                board.is_running()
            );
        }
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&board.snapshot())?);
        }
    }
    Ok(())
}

fn run_versus(args: &Args, config: BoardConfig) -> Result<()> {
    let opponent_config = config.with_seed(config.seed.wrapping_add(1));
    let mut versus = Versus::with_configs(config, opponent_config)?;
    let mut player_input = Input::new(args.script.as_deref(), args.seed)?;
    let mut opponent_input = Input::new(args.script.as_deref(), args.seed.wrapping_add(1))?;
    versus.start();

    let mut played = 0;
    for frame in 0..args.frames {
        if versus.is_over() {
            break;
        }
        if is_input_frame(frame, args.every) {
            versus.apply_action(PlayerSide::Player, player_input.next_action());
            versus.apply_action(PlayerSide::Opponent, opponent_input.next_action());
        }
        versus.frame();
        played += 1;
    }

    info!(frames = played, winner = ?versus.winner(), "versus soak finished");

    match args.output {
        Output::Ascii => {
            for side in [PlayerSide::Player, PlayerSide::Opponent] {
                let board = versus.board(side);
                println!("{side:?}");
                println!("{}", board.grid());
                println!(
                    "score {}  level {}  lines {}  pending {}  running {}",
                    board.score(),
                    board.level(),
                    board.lines(),
                    board.pending_garbage(),
                    board.is_running()
                );
            }
            if let Some(winner) = versus.winner() {
                println!("winner: {winner:?}");
            }
        }
        Output::Json => {
            println!("{}", serde_json::to_string_pretty(&versus.snapshot())?);
        }
    }
    Ok(())
}
