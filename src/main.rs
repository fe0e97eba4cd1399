use num_bigint_dig::{BigInt, Sign};
use tracing::info;
use tracing_subscriber::EnvFilter;
use weierstrass_gf::{create_set, Curve, FieldElement, PrimalityConfig, Result, SECP256K1};

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let config = PrimalityConfig::from_env();
    info!(rounds = config.rounds, "primality check");

    let a = FieldElement::new_with(3, 17, &config)?;
    let b = FieldElement::new_with(5, 17, &config)?;

    println!("Sum: {}", a.add(&b)?);
    println!("Product: {}", a.mul(&b)?);
    println!("Power: {}", a.pow(5)?);
    println!("Division: {}", a.div(&b)?);
    println!("Negative power: {}", a.pow(-2)?);

    let set = create_set(7)?;
    let set = set.iter().map(ToString::to_string).collect::<Vec<_>>();
    println!("Set: [{}]", set.join(", "));

    let large = FieldElement::new_with(
        37_246_545_362_547_456_373_635_472i128,
        BigInt::from_biguint(Sign::Plus, SECP256K1.curve.prime().clone()),
        &config,
    )?;
    println!("Large field calculation: {}", large.pow(2)?);

    let curve = Curve::from_reduced(5, 7, 223)?;
    let p = curve.point_from(-1, -1)?;
    println!("P: {}", p);
    println!("P + P: {}", p.double()?);
    println!("P + -P: {}", p.add(&p.negate())?);

    let g = &SECP256K1.generator;
    println!("{} order * G: {}", SECP256K1.name, g.multiply(&SECP256K1.order)?);

    Ok(())
}
