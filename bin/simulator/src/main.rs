//! Dispute simulator
//!
//! Replays complete dispute lifecycles against the in-memory collaborators,
//! logging every state transition along the way.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use colosseum_dispute::scenario::{Scenario, ASSERTER, COUNCIL};
use colosseum_dispute::traits::OutputOracle;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Run {
    /// Bisect to a single block, prove the fault, council approves
    FaultProof,
    /// Asserter never answers; the challenger proves without anchoring
    AsserterTimeout,
    /// Challenger forfeits twice; each reopening doubles the bond
    Rechallenge,
}

#[derive(Parser)]
#[command(name = "colosseum-simulator", about = "Replay fault-dispute scenarios")]
struct Args {
    /// Scenario to replay
    #[arg(long, value_enum, default_value_t = Run::FaultProof)]
    scenario: Run,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    info!("Colosseum dispute simulator");

    match args.scenario {
        Run::FaultProof => fault_proof(),
        Run::AsserterTimeout => asserter_timeout(),
        Run::Rechallenge => rechallenge(),
    }
}

fn fault_proof() -> Result<()> {
    let mut s = Scenario::bootstrap()?;
    let index = s.output_index;
    log_target(&s, index);

    s.open(index)?;
    info!("  status: {:?}", s.colosseum.get_status(index));

    for (caller, pos, segments) in s.bisection_script(index) {
        s.clock.advance(30);
        s.colosseum.bisect(caller, index, pos, segments)?;
        info!("  status: {:?}", s.colosseum.get_status(index));
    }

    s.clock.advance(30);
    s.prove(index)?;
    info!("  status: {:?}", s.colosseum.get_status(index));

    s.colosseum.approve_challenge(COUNCIL, index)?;
    info!("  status: {:?}", s.colosseum.get_status(index));
    log_target(&s, index);
    info!("events emitted: {}", s.colosseum.events().len());
    Ok(())
}

fn asserter_timeout() -> Result<()> {
    let mut s = Scenario::bootstrap()?;
    let index = s.output_index;
    log_target(&s, index);

    s.open(index)?;
    info!("  status: {:?}", s.colosseum.get_status(index));

    s.clock.advance(121);
    info!(
        "  asserter stays silent past the deadline, status: {:?}",
        s.colosseum.get_status(index)
    );

    s.prove(index)?;
    info!("  proof accepted without anchoring, status: {:?}", s.colosseum.get_status(index));

    s.colosseum.approve_challenge(COUNCIL, index)?;
    log_target(&s, index);
    Ok(())
}

fn rechallenge() -> Result<()> {
    let mut s = Scenario::bootstrap()?;
    let index = s.output_index;
    log_target(&s, index);

    for round in 1..=3u32 {
        s.open(index)?;
        info!(
            "round {}: challenge opened, bond {:?}",
            round,
            s.colosseum.bond_pool().bond_of(index)
        );
        if round == 3 {
            break;
        }
        // Let both windows lapse so the challenger forfeits.
        s.clock.advance(120 + 480 + 1);
        info!("  status: {:?}", s.colosseum.get_status(index));
        s.colosseum.challenger_timeout(ASSERTER, index)?;
        info!("  slot reclaimed, status: {:?}", s.colosseum.get_status(index));
    }
    Ok(())
}

fn log_target(s: &Scenario, index: u64) {
    if let Some(output) = s.colosseum.oracle().l2_output(index) {
        info!(
            "output {}: block {} root 0x{} submitter 0x{}",
            index,
            output.l2_block_number,
            hex::encode(&output.output_root[..4]),
            hex::encode(&output.submitter[..4]),
        );
    }
}
