use std::error::Error;
use std::process;

use clap::Parser;

use palace::{
    Action, Bot, BotMessaging, Game, Messaging, PlayerId, RequestType, Update, create_bot_from_spec,
    describe_action,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

/// Drives a simulated game to completion between 2-4 named bot seats.
#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Run a simulated game to completion")]
struct Args {
    /// Seed used to shuffle the deck.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Stop (declaring a draw) after this many turns.
    #[arg(long)]
    max_turns: Option<usize>,

    /// Print every observation and chosen action as the game progresses.
    #[arg(short, long)]
    visualize: bool,

    /// Bot specs, one per seat (2-4 total): human[:name], random[:seed],
    /// greedy, mcts[:iterations]. Defaults to one human and one greedy bot.
    bots: Vec<String>,
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let bot_specs = if args.bots.is_empty() {
        vec![String::from("human"), String::from("greedy")]
    } else {
        args.bots
    };

    let num_players = bot_specs.len();
    let mut builder = Game::builder(num_players)?.with_seed(args.seed);
    if let Some(max_turns) = args.max_turns {
        builder = builder.with_max_turns(max_turns);
    }
    let mut game = builder.build()?;

    let bots: Vec<Box<dyn Bot>> = bot_specs
        .iter()
        .enumerate()
        .map(|(index, spec)| create_bot_from_spec(spec, index, args.seed))
        .collect::<Result<_, _>>()?;

    println!("Starting simulation with {num_players} players: {}", bot_specs.join(", "));
    let mut messaging: Box<dyn Messaging> = if args.visualize {
        Box::new(LoggingMessaging::new(BotMessaging::new(bots)))
    } else {
        Box::new(BotMessaging::new(bots))
    };

    let status = game.run(&mut *messaging);
    println!("Game finished: {status:?}");
    Ok(())
}

/// Wraps a [`Messaging`] adapter to print every update/request on the way
/// through, for `--visualize`.
struct LoggingMessaging<M: Messaging> {
    inner: M,
}

impl<M: Messaging> LoggingMessaging<M> {
    fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<M: Messaging> Messaging for LoggingMessaging<M> {
    fn send_update(&mut self, player: PlayerId, update: Update) {
        println!("  [player {player}] <- {update:?}");
        self.inner.send_update(player, update);
    }

    fn request(&mut self, player: PlayerId, request_type: RequestType) -> Action {
        let action = self.inner.request(player, request_type);
        println!("  [player {player}] -> {}", describe_action(&action));
        action
    }
}
