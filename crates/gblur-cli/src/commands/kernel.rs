//! Kernel command
//!
//! Prints the normalized Gaussian weights for a radius.

use crate::KernelArgs;
use anyhow::Result;
use gblur_ops::{gaussian_sigma, Kernel, SeparableKernel};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: KernelArgs) -> Result<()> {
    trace!(radius = %args.radius, separable = args.separable, "kernel::run");
    print!("{}", render(&args));
    Ok(())
}

fn render(args: &KernelArgs) -> String {
    let p = args.precision;
    let mut out = format!(
        "radius {}  side {}  sigma {}\n",
        args.radius,
        args.radius.side(),
        gaussian_sigma(args.radius)
    );

    if args.separable {
        let taps = SeparableKernel::gaussian(args.radius);
        let row: Vec<String> = taps.taps().iter().map(|w| format!("{w:.p$}")).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
        out.push_str(&format!("sum {:.p$}\n", taps.taps().iter().sum::<f64>()));
    } else {
        let kernel = Kernel::gaussian(args.radius);
        for row in kernel.weights().chunks(kernel.side()) {
            let cells: Vec<String> = row.iter().map(|w| format!("{w:.p$}")).collect();
            out.push_str(&cells.join(" "));
            out.push('\n');
        }
        out.push_str(&format!("sum {:.p$}\n", kernel.sum()));
    }
    out
}
