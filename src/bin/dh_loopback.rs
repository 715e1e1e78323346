//! Runs one complete exchange over the in-process loopback transport.
//!
//! Reads the group from `DH_GROUP` (`modp1536`, `modp2048`) or explicit decimal
//! `DH_P` / `DH_G`, defaulting to `modp2048`.

use std::env;

use modexp_dh::{
    run_initiator, DomainParameters, LoopbackTransport, NamedGroup, OsEntropy, Responder,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let params = match (env::var("DH_P"), env::var("DH_G")) {
        (Ok(p), Ok(g)) => DomainParameters::from_decimal(&p, &g)?,
        _ => {
            let group: NamedGroup = env::var("DH_GROUP")
                .unwrap_or_else(|_| NamedGroup::Rfc3526Modp2048.name().to_string())
                .parse()?;
            DomainParameters::named(group)?
        }
    };

    let mut transport = LoopbackTransport::new(Responder::new(OsEntropy));
    let outcome = run_initiator(&params, &mut transport, &mut OsEntropy)?;

    println!("p bits: {}", params.modulus().bit_length());
    println!("x: {}", outcome.public_value);
    println!("y: {}", outcome.peer_public_value);
    println!("K agreed: {}", outcome.agrees());

    if !outcome.agrees() {
        return Err("shared secrets differ".into());
    }
    Ok(())
}
