pub fn run() -> anyhow::Result<()> {
    println!("clarity {}", env!("CARGO_PKG_VERSION"));
    println!("Context-aware notification triage");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_output() {
        let result = run();
        assert!(result.is_ok());
    }
}
