//! Lee las ordenes guardadas en un directorio, dibuja sus arboles de
//! dependencias y muestra las estadisticas del lote.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use ordenes_sinteticas::estadisticas::Estadisticas;
use ordenes_sinteticas::{lector, registro};

/// Inspector de archivos de ordenes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Inspector {
    /// Directorio con los archivos de ordenes
    #[arg(short, long, default_value = "data")]
    directorio: PathBuf,

    /// Cantidad maxima de ordenes a dibujar
    #[arg(short, long, default_value_t = 20)]
    maximo: usize,
}

fn main() -> ExitCode {
    registro::inicializar();
    let inspector = Inspector::parse();

    let lectura = match lector::leer_directorio(&inspector.directorio) {
        Ok(lectura) => lectura,
        Err(error) => {
            eprintln!("{} {}", "Error:".red().bold(), error);
            return ExitCode::FAILURE;
        }
    };

    for orden in lectura.ordenes.iter().take(inspector.maximo) {
        println!("{}", lector::dibujar_arbol(orden));
    }
    for (ruta, error) in &lectura.fallidos {
        eprintln!("{} {}: {}", "No se pudo leer".red(), ruta.display(), error);
    }

    println!("{}", Estadisticas::calcular(&lectura.ordenes));
    ExitCode::SUCCESS
}
