//! Version command implementation

use linkerconfig_core::DATA_ASAN_PATH;

pub fn execute() {
    println!("linkerconfig {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Features:");
    println!("  - Isolated and visible namespaces");
    println!("  - Search and permitted path lists");
    println!("  - ASan path variants under {DATA_ASAN_PATH}");
    println!("  - Namespace links with shared libraries");
}
