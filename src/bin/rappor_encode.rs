//! Encode values into RAPPOR reports from the command line.
//!
//! Prints one lower-hex IRR per value. Values come from the arguments, or
//! from stdin (one per line) when none are given.

use std::io::{self, BufRead};

use clap::{Parser, ValueEnum};
use rappor::{assign_cohort, Bits, Deps, Encoder, GeneratorOpenSSL, HashFunction, HmacDrbg,
             HmacFunction, HmacSha256, Md5, Params, RapporError, Sha256};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HmacKind {
    /// HMAC-SHA256, up to 32 bits
    Sha256,
    /// HMAC_DRBG, byte-aligned widths up to 256 bits
    Drbg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HashKind {
    Md5,
    Sha256,
}

#[derive(Parser, Debug)]
#[command(name = "rappor-encode", about = "Encode values into RAPPOR reports")]
struct Config {
    /// Values to encode; read from stdin when empty
    values: Vec<String>,

    /// Name of the metric, used in log output
    #[arg(long, env = "RAPPOR_ENCODER_ID", default_value = "rappor-encode")]
    encoder_id: String,

    /// Client secret keying the PRR and the cohort assignment
    #[arg(long, env = "RAPPOR_CLIENT_SECRET", hide_env_values = true)]
    secret: String,

    /// Cohort; derived from the secret when not given
    #[arg(long, env = "RAPPOR_COHORT")]
    cohort: Option<u32>,

    #[arg(long, env = "RAPPOR_NUM_BITS", default_value_t = 32)]
    num_bits: u32,

    #[arg(long, env = "RAPPOR_NUM_HASHES", default_value_t = 2)]
    num_hashes: u32,

    #[arg(long, env = "RAPPOR_NUM_COHORTS", default_value_t = 128)]
    num_cohorts: u32,

    #[arg(long, env = "RAPPOR_PROB_F", default_value_t = 0.25)]
    prob_f: f64,

    #[arg(long, env = "RAPPOR_PROB_P", default_value_t = 0.75)]
    prob_p: f64,

    #[arg(long, env = "RAPPOR_PROB_Q", default_value_t = 0.5)]
    prob_q: f64,

    #[arg(long, value_enum, env = "RAPPOR_HMAC", default_value = "sha256")]
    hmac: HmacKind,

    #[arg(long = "hash", value_enum, env = "RAPPOR_HASH", default_value = "md5")]
    hash: HashKind,

    /// Also print the Bloom filter and PRR
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::parse();
    let params = Params::new(config.num_bits, config.num_hashes, config.num_cohorts,
                             config.prob_f, config.prob_p, config.prob_q)?;

    match (config.hash, config.hmac) {
        (HashKind::Md5, HmacKind::Sha256) => run(&config, params, Md5, HmacSha256)?,
        (HashKind::Md5, HmacKind::Drbg) => run(&config, params, Md5, HmacDrbg)?,
        (HashKind::Sha256, HmacKind::Sha256) => run(&config, params, Sha256, HmacSha256)?,
        (HashKind::Sha256, HmacKind::Drbg) => run(&config, params, Sha256, HmacDrbg)?,
    }
    Ok(())
}

fn run<H: HashFunction, M: HmacFunction>(config: &Config, params: Params, hash: H,
                                         hmac: M) -> Result<(), Box<dyn std::error::Error>> {
    let cohort = match config.cohort {
        Some(c) => c,
        None => assign_cohort(&hmac, config.secret.as_bytes(), params.num_cohorts())?,
    };
    let deps = Deps::new(cohort, hash, config.secret.as_bytes(), hmac, GeneratorOpenSSL);
    let encoder = Encoder::new(config.encoder_id.as_str(), params, deps)?;
    info!(encoder_id = encoder.encoder_id(), cohort, "encoding");

    if config.values.is_empty() {
        for line in io::stdin().lock().lines() {
            report(&encoder, config.verbose, &line?)?;
        }
    } else {
        for value in &config.values {
            report(&encoder, config.verbose, value)?;
        }
    }
    Ok(())
}

fn report<H: HashFunction, M: HmacFunction>(encoder: &Encoder<H, M, GeneratorOpenSSL>,
                                            verbose: bool, value: &str)
                                            -> Result<(), RapporError> {
    if verbose {
        let r = encoder.encode_internal(value.as_bytes())?;
        println!("{}\tbloom={}\tprr={}\tirr={}", value, hex(&r.bloom), hex(&r.prr), hex(&r.irr));
    } else {
        println!("{}", hex(&encoder.encode_string(value)?));
    }
    Ok(())
}

fn hex(bits: &Bits) -> String {
    format!("{:x}", bits)
}
