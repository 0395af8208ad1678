const PRETTY_VAR: &str = "RUST_LOG_PRETTY";

fn main() {
    println!("cargo::rustc-check-cfg=cfg(tracing_pretty)");
    println!("cargo::rerun-if-env-changed={PRETTY_VAR}");

    let pretty = std::env::var(PRETTY_VAR).is_ok_and(|value| value == "1");
    if pretty {
        println!("cargo::rustc-cfg=tracing_pretty");
    }
}
