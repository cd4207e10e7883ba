use crate::ScanArgs;
use tracing::info;

pub fn run(scan: &ScanArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    info!("Scanning {}...", scan.classes.display());
    let (_, result) = scan.scan()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for name in &result {
            println!("{name}");
        }
    }
    Ok(())
}
