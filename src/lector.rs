//! Este modulo permite leer de vuelta los archivos de ordenes de un directorio
//! y dibujarlos como arboles en consola, marcando con estrellas el nivel de
//! cada dependencia.

use std::fmt::Write;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::warn;

use crate::aliases::Profundidad;
use crate::errores::ErrorDuranteParseo;
use crate::orden::{self, Orden};

/// Ordenes leidas de un directorio, junto con los archivos que no se pudieron leer
#[derive(Debug, Default)]
pub struct Lectura {
    pub ordenes: Vec<Orden>,
    pub fallidos: Vec<(PathBuf, ErrorDuranteParseo)>,
}

/// Lee una orden desde su archivo
pub fn leer_orden(ruta: &Path) -> Result<Orden, ErrorDuranteParseo> {
    let mut archivo = File::open(ruta)?;
    let orden = orden::from_reader(&mut archivo)?;
    Ok(orden)
}

/// Lee todos los archivos `.json` del directorio, ordenados por nombre. Los
/// archivos ilegibles no cortan la lectura, quedan en `fallidos`
/// # Errors
/// * `ErrorDuranteParseo::NoSePudoAbrirArchivo` si no se puede listar el directorio
pub fn leer_directorio(directorio: &Path) -> Result<Lectura, ErrorDuranteParseo> {
    let mut rutas: Vec<PathBuf> = fs::read_dir(directorio)?
        .filter_map(|entrada| entrada.ok().map(|e| e.path()))
        .filter(|ruta| ruta.is_file() && ruta.extension().is_some_and(|ext| ext == "json"))
        .collect();
    rutas.sort();

    let mut lectura = Lectura::default();
    for ruta in rutas {
        match leer_orden(&ruta) {
            Ok(orden) => lectura.ordenes.push(orden),
            Err(error) => {
                warn!(ruta = %ruta.display(), %error, "archivo de orden ilegible");
                lectura.fallidos.push((ruta, error));
            }
        }
    }
    Ok(lectura)
}

/// Dibuja el arbol completo de una orden, una linea por orden y por recurso
pub fn dibujar_arbol(orden: &Orden) -> String {
    let mut salida = String::new();
    dibujar(&mut salida, orden, 0);
    salida
}

fn dibujar(salida: &mut String, orden: &Orden, nivel: Profundidad) {
    let sangria = "    ".repeat(usize::from(nivel));
    let estrellas = if nivel > 0 {
        format!("{} ", "★".repeat(usize::from(nivel) + 1))
    } else {
        String::new()
    };
    let _ = writeln!(salida, "{sangria}{estrellas}{orden}");
    let _ = writeln!(salida, "{sangria}  {}", orden.descripcion.dimmed());
    for recurso in &orden.recursos {
        let _ = writeln!(salida, "{sangria}  - {recurso}");
    }
    for dep in &orden.dependencias {
        dibujar(salida, dep, nivel + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::estadisticas::Estadisticas;
    use crate::generators::ordenes_gen::Generador;
    use crate::serializador;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn generar(cantidad: usize) -> Vec<Orden> {
        let config = Config {
            cantidad,
            ..Config::default()
        };
        Generador::new(&config, StdRng::seed_from_u64(31))
            .unwrap()
            .generar()
    }

    #[test]
    fn lee_lo_que_escribe_el_serializador() {
        let dir = TempDir::new().unwrap();
        let ordenes = generar(15);
        serializador::guardar_ordenes(dir.path(), &ordenes);

        let lectura = leer_directorio(dir.path()).unwrap();

        assert!(lectura.fallidos.is_empty());
        assert_eq!(lectura.ordenes, ordenes);
        assert_eq!(
            Estadisticas::calcular(&lectura.ordenes),
            Estadisticas::calcular(&ordenes)
        );
    }

    #[test]
    fn saltea_archivos_mal_formados_y_ajenos() {
        let dir = TempDir::new().unwrap();
        let ordenes = generar(2);
        serializador::guardar_ordenes(dir.path(), &ordenes);
        fs::write(dir.path().join("roto.json"), "{ no es json").unwrap();
        fs::write(dir.path().join("notas.txt"), "ignorar").unwrap();

        let lectura = leer_directorio(dir.path()).unwrap();

        assert_eq!(lectura.ordenes.len(), 2);
        assert_eq!(lectura.fallidos.len(), 1);
        assert!(matches!(
            lectura.fallidos[0].1,
            ErrorDuranteParseo::FormatoArchivoInvalido(_)
        ));
    }

    #[test]
    fn directorio_inexistente_es_un_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            leer_directorio(&dir.path().join("no-existe")),
            Err(ErrorDuranteParseo::NoSePudoAbrirArchivo(_))
        ));
    }

    #[test]
    fn el_arbol_marca_el_nivel_con_estrellas() {
        let config = Config {
            cantidad: 1,
            probabilidad_reuso: 0.0,
            max_dependencias: 1,
            max_recursos: 1,
            ..Config::default()
        };
        let orden = Generador::new(&config, StdRng::seed_from_u64(32))
            .unwrap()
            .generar()
            .remove(0);

        let arbol = dibujar_arbol(&orden);
        let lineas: Vec<&str> = arbol.lines().collect();

        assert!(lineas[0].starts_with("Orden "));
        assert!(lineas[0].contains("80000"));
        assert!(lineas[2].trim_start().starts_with("- R"));
        assert!(arbol.contains("★★ Orden "));
        assert_eq!(
            lineas.iter().filter(|l| l.contains("Orden ")).count(),
            orden.profundidad() as usize + 1
        );
    }
}
