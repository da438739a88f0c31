//! Genera las ordenes sinteticas y las guarda, una por archivo, en el
//! directorio indicado (por defecto `data`).

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use ordenes_sinteticas::config::{Argumentos, Config};
use ordenes_sinteticas::ejecucion;
use ordenes_sinteticas::errores::Error;
use ordenes_sinteticas::registro;

fn correr(args: Argumentos) -> Result<(), Error> {
    let config = Config::try_from(args)?;

    println!("{}", "Iniciando la generacion de ordenes sinteticas...".bold());
    println!("Directorio destino: {}", config.directorio.display());

    let resumen = ejecucion::ejecutar(&config)?;

    println!("\n{}", "Generacion completa!".green().bold());
    println!("Directorio: {}", config.directorio.display());
    println!(
        "Archivos guardados: {}",
        resumen.guardado.guardados.to_string().green()
    );
    println!("Errores: {}", resumen.guardado.errores.to_string().red());

    println!("\n{}", resumen.estadisticas);

    resumen.verificar()?;
    println!(
        "\nTodos los archivos fueron generados y guardados en: {}",
        config.directorio.display()
    );
    Ok(())
}

/// Sale con codigo distinto de cero si la configuracion es invalida, si no se
/// pudo crear el directorio o si fallo algun archivo
fn main() -> ExitCode {
    registro::inicializar();
    match correr(Argumentos::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{} {}", "Error:".red().bold(), error);
            ExitCode::FAILURE
        }
    }
}
