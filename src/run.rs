use std::fs::File;
use std::io::{self, BufWriter, Write};

use hmstl_grid::{GridReport, SampleGrid, compute_statistics};
use hmstl_io::{StlWriter, load_pgm, read_pgm};
use hmstl_mesh::{Tally, assemble_solid};

use crate::config::Settings;
use crate::error::AppError;

fn read_grid(settings: &Settings) -> Result<SampleGrid, AppError> {
    let grid = match &settings.input {
        Some(path) => load_pgm(path)?,
        None => read_pgm(io::stdin().lock())?,
    };
    if grid.is_empty() {
        return Err(AppError::EmptyGrid);
    }
    Ok(grid)
}

fn open_output(settings: &Settings) -> Result<Box<dyn Write>, AppError> {
    Ok(match &settings.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| AppError::OutputOpen {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

/// Reads the heightmap, then writes the solid. Output is opened only once
/// the input has decoded, so a bad input never leaves an empty STL behind.
pub fn run(settings: &Settings) -> Result<(), AppError> {
    let grid = read_grid(settings)?;
    if settings.verbose {
        let stats = compute_statistics(&grid)?;
        log::info!("{}", GridReport { grid: &grid, stats });
    }

    let out = open_output(settings)?;
    let mut sink = Tally::new(StlWriter::new(out));
    let written = assemble_solid(&mut sink, &grid, &settings.solid)?;
    let bounds = sink.bounds();
    sink.into_inner().finish().map_err(AppError::Output)?;

    log::info!("Facets: {written}");
    if let Some(bb) = bounds {
        log::info!(
            "Bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
            bb.min.x,
            bb.min.y,
            bb.min.z,
            bb.max.x,
            bb.max.y,
            bb.max.z
        );
    }
    Ok(())
}
