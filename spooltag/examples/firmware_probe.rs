//! Probe a PN532 serial bridge and dump any spool tag in the field.
//!
//! Usage:
//!   cargo run -p spooltag --example firmware_probe --features serial -- /dev/ttyUSB0

use spooltag::tag;
use spooltag::transport::{Pn532Transport, SerialDuplex};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/ttyUSB0".to_string());

    let duplex = SerialDuplex::open(&path)?;
    let transport = Pn532Transport::open(Box::new(duplex))?;

    let fw = tag::probe(&transport)?;
    println!(
        "PN532 at {}: IC {:#04x}, firmware {}.{}, support {:#04x}",
        path, fw.ic, fw.ver, fw.rev, fw.support
    );

    tag::configure(&transport)?;

    match tag::detect(&transport, spooltag::tag_access_timeout())? {
        Some(target) => {
            println!("tag in field: uid {}", target.uid_hex());
            match tag::read_tag_pages(&transport, &target) {
                Ok(record) => {
                    println!(
                        "{} {} ({}) {} {:.2}mm {}g, print {}-{}C bed {}-{}C",
                        record.brand,
                        record.sku,
                        record.material,
                        record.color,
                        record.diameter.as_mm(),
                        record.weight_grams,
                        record.print_temp_min,
                        record.print_temp_max,
                        record.bed_temp_min,
                        record.bed_temp_max,
                    );
                }
                Err(e) => println!("tag present but unreadable as a spool record: {}", e),
            }
        }
        None => println!("no tag in field"),
    }

    transport.close();
    Ok(())
}
