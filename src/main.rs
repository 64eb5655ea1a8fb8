//! Refund Merkle CLI
//!
//! Computes the root committed on-chain and the proofs holders submit to claim.
//! `verify` lets an auditor check a root (and optionally a proof) taken from the
//! contract against one rebuilt from the snapshot.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use refund_merkle::{
    canonicalize_address, verify_proof, AddressSet, Commitment, HashValue, LeafEncoding,
    LeafHasher, MerkleConfig, MerkleError, OddNodeRule, SortedKeccakHasher,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process;

/// Exit status for an address outside the committed set
const EXIT_NOT_ELIGIBLE: i32 = 2;
const EXIT_FAILURE: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "refund-merkle")]
#[command(about = "Merkle root and inclusion proofs for an address snapshot", long_about = None)]
#[command(version)]
struct Cli {
    /// Leaf encoding (checksum-string or address-bytes)
    #[arg(long, global = true, env = "MERKLE_LEAF_ENCODING")]
    leaf_encoding: Option<LeafEncoding>,

    /// Rule for the last node of an odd level (promote or duplicate)
    #[arg(long, global = true, env = "MERKLE_ODD_NODE_RULE")]
    odd_node_rule: Option<OddNodeRule>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the Merkle root of the snapshot
    Root {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Print root and tree stats as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the inclusion proof for one address as JSON
    Proof {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Address to prove, in any letter case
        #[arg(short, long)]
        address: String,
    },
    /// Check an expected root, and optionally one address's proof, against the snapshot
    Verify {
        #[command(flatten)]
        snapshot: SnapshotArgs,

        /// Root the snapshot must produce, e.g. the one stored in the contract
        #[arg(short, long)]
        root: HashValue,

        /// Address whose proof should reach the expected root
        #[arg(short, long)]
        address: Option<String>,

        /// Comma-separated proof to replay instead of the one rebuilt from the snapshot
        #[arg(short, long, value_delimiter = ',', requires = "address")]
        proof: Option<Vec<HashValue>>,
    },
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// Snapshot file: JSON object keyed by address, JSON array, or one address per line
    #[arg(short, long, env = "MERKLE_SNAPSHOT_PATH")]
    snapshot: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RootOutput {
    root: String,
    leaf_count: usize,
    depth: usize,
    leaf_encoding: LeafEncoding,
    odd_node_rule: OddNodeRule,
}

#[derive(Debug, Serialize)]
struct ProofOutput {
    address: String,
    leaf: String,
    leaf_index: usize,
    proof: Vec<String>,
    root: String,
}

/// Mismatches found by `verify`
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
enum VerifyError {
    #[error("snapshot root {actual} does not match expected root {expected}")]
    RootMismatch {
        expected: HashValue,
        actual: HashValue,
    },

    #[error("proof for {address} does not reach expected root {expected}")]
    ProofMismatch { address: String, expected: HashValue },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let status = exit_status(&e);
        if status == EXIT_NOT_ELIGIBLE {
            eprintln!("not eligible: {e}");
        } else {
            eprintln!("Error: {e:#}");
        }
        process::exit(status);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = MerkleConfig::from_env().context("Invalid environment configuration")?;
    if let Some(encoding) = cli.leaf_encoding {
        config.leaf_encoding = encoding;
    }
    if let Some(rule) = cli.odd_node_rule {
        config.odd_node_rule = rule;
    }

    match cli.command {
        Commands::Root { snapshot, json } => {
            let commitment = build_commitment(&config, snapshot)?;
            println!("{}", render_root(&commitment, &config, json)?);
        }
        Commands::Proof { snapshot, address } => {
            let commitment = build_commitment(&config, snapshot)?;
            let output = proof_output(&commitment, &address)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Verify {
            snapshot,
            root,
            address,
            proof,
        } => {
            let commitment = build_commitment(&config, snapshot)?;
            println!(
                "{}",
                verify_against(&commitment, &config, &root, address.as_deref(), proof)?
            );
        }
    }
    Ok(())
}

/// `EXIT_NOT_ELIGIBLE` for an address outside the set, `EXIT_FAILURE` otherwise
fn exit_status(e: &anyhow::Error) -> i32 {
    match e.downcast_ref::<MerkleError>() {
        Some(merkle) if merkle.is_not_eligible() => EXIT_NOT_ELIGIBLE,
        _ => EXIT_FAILURE,
    }
}

fn build_commitment(config: &MerkleConfig, args: SnapshotArgs) -> Result<Commitment> {
    let path = args
        .snapshot
        .or_else(|| config.snapshot_path.clone())
        .context("No snapshot given (use --snapshot or MERKLE_SNAPSHOT_PATH)")?;
    let set = AddressSet::load(&path).with_context(|| format!("Failed to load snapshot {:?}", path))?;
    Commitment::build(&set, config).context("Failed to build Merkle tree")
}

/// Lowercase hex root, or the root with tree stats as JSON
fn render_root(commitment: &Commitment, config: &MerkleConfig, json: bool) -> Result<String> {
    if !json {
        return Ok(commitment.root().to_hex());
    }
    let stats = commitment.tree().stats();
    let output = RootOutput {
        root: stats.root.to_prefixed_hex(),
        leaf_count: stats.leaf_count,
        depth: stats.depth,
        leaf_encoding: config.leaf_encoding,
        odd_node_rule: config.odd_node_rule,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn proof_output(commitment: &Commitment, address: &str) -> Result<ProofOutput, MerkleError> {
    let proof = commitment.proof_for(address)?;
    Ok(ProofOutput {
        address: canonicalize_address(address)?,
        leaf: proof.leaf.to_prefixed_hex(),
        leaf_index: proof.leaf_index,
        proof: proof.to_hex_strings(),
        root: commitment.root().to_prefixed_hex(),
    })
}

/// Checks the snapshot root against `expected`, then, when an address is
/// given, replays its proof (supplied or rebuilt) against `expected`.
fn verify_against(
    commitment: &Commitment,
    config: &MerkleConfig,
    expected: &HashValue,
    address: Option<&str>,
    supplied_proof: Option<Vec<HashValue>>,
) -> Result<String> {
    if commitment.root() != *expected {
        log::warn!("snapshot root {} differs from expected {}", commitment.root(), expected);
        return Err(VerifyError::RootMismatch {
            expected: *expected,
            actual: commitment.root(),
        }
        .into());
    }

    let Some(address) = address else {
        return Ok(format!("valid: snapshot root matches {expected}"));
    };

    let (leaf, siblings) = match supplied_proof {
        Some(siblings) => (LeafHasher::new(config.leaf_encoding).leaf(address)?, siblings),
        None => {
            let proof = commitment.proof_for(address)?;
            (proof.leaf, proof.siblings)
        }
    };

    if verify_proof(&SortedKeccakHasher, &leaf, &siblings, expected) {
        Ok(format!("valid: proof for {address} reaches root {expected}"))
    } else {
        log::warn!("proof for {address} does not reach {expected}");
        Err(VerifyError::ProofMismatch {
            address: address.to_string(),
            expected: *expected,
        }
        .into())
    }
}
