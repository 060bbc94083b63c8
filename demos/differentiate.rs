use symdiff::{DifferentiationError, Expression};
use tracing_subscriber::EnvFilter;

fn main() {
    // set RUST_LOG=debug to see each differentiation request
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let x = Expression::x;
    let c = Expression::constant;

    // f(x) = (x^2 + 3x) * sin(x)
    let f = (x().pow(c(2.0)) + c(3.0) * x()) * x().sin();
    report("f", &f, 2.0);

    // the power rule only works with constant exponents
    let g = x().pow(x());
    report("g", &g, 2.0);
}

fn report(name: &str, expr: &Expression, sample: f64) {
    println!("{}(x) = {}", name, expr);

    match expr.derivative() {
        Ok(derivative) => println!("{}'(x) = {}", name, derivative),
        Err(e @ DifferentiationError::NonConstantExponent { .. }) => {
            eprintln!("Unable to differentiate {}: {}", name, e);
        },
    }

    println!("{}({}) = {}", name, sample, expr.evaluate(sample));
}
