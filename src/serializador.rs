//! Este modulo escribe cada orden principal, con todo su arbol, en un archivo
//! json propio dentro del directorio de salida. Un archivo que no se puede
//! escribir se informa y se saltea, sin cortar el resto del lote.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;
use tracing::{info, warn};

use crate::errores::ErrorSalida;
use crate::orden::Orden;
use crate::INTERVALO_PROGRESO;

/// Conteo de archivos guardados y fallidos de un lote
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResultadoGuardado {
    pub guardados: usize,
    pub errores: usize,
}

/// Crea el directorio de salida si no existe
/// # Errors
/// * `ErrorSalida::NoSePudoCrearDirectorio` si no se puede crear o lo que existe no es un directorio
pub fn preparar_directorio(ruta: &Path) -> Result<(), ErrorSalida> {
    if ruta.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(ruta).map_err(|fuente| ErrorSalida::NoSePudoCrearDirectorio {
        ruta: ruta.to_path_buf(),
        fuente,
    })?;
    println!("Directorio creado: {}", ruta.display().to_string().blue());
    Ok(())
}

/// Nombre del archivo de una orden: su numero con extension json
pub fn nombre_archivo(orden: &Orden) -> String {
    format!("{}.json", orden.numero)
}

/// A partir de un directorio y una orden, escribe el archivo de la orden y
/// devuelve su ruta
pub fn guardar_orden(directorio: &Path, orden: &Orden) -> io::Result<PathBuf> {
    let ruta = directorio.join(nombre_archivo(orden));
    let mut file = File::create(&ruta)?;
    let json_data = serde_json::to_string_pretty(orden)?;
    file.write_all(json_data.as_bytes())?;

    Ok(ruta)
}

/// Guarda todas las ordenes, contando los archivos escritos y los que fallaron
pub fn guardar_ordenes(directorio: &Path, ordenes: &[Orden]) -> ResultadoGuardado {
    let mut resultado = ResultadoGuardado::default();

    for orden in ordenes {
        match guardar_orden(directorio, orden) {
            Ok(ruta) => {
                info!(ruta = %ruta.display(), "orden guardada");
                resultado.guardados += 1;
                if resultado.guardados % INTERVALO_PROGRESO == 0 {
                    println!(
                        "Guardados {} archivos...",
                        resultado.guardados.to_string().blue()
                    );
                }
            }
            Err(error) => {
                warn!(orden = orden.numero, %error, "no se pudo guardar la orden");
                eprintln!(
                    "{} {}: {}",
                    "Error guardando".red(),
                    nombre_archivo(orden),
                    error
                );
                resultado.errores += 1;
            }
        }
    }
    resultado
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generators::ordenes_gen::Generador;
    use crate::orden;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    fn ordenes(cantidad: usize) -> Vec<Orden> {
        let config = Config {
            cantidad,
            tam_pozo: 10,
            ..Config::default()
        };
        Generador::new(&config, StdRng::seed_from_u64(21))
            .unwrap()
            .generar()
    }

    #[test]
    fn crea_el_directorio_si_no_existe() {
        let dir = TempDir::new().unwrap();
        let anidado = dir.path().join("data").join("ordenes");

        assert!(preparar_directorio(&anidado).is_ok());
        assert!(anidado.is_dir());
        assert!(preparar_directorio(&anidado).is_ok());
    }

    #[test]
    fn falla_si_la_ruta_es_un_archivo() {
        let dir = TempDir::new().unwrap();
        let archivo = dir.path().join("ocupado");
        File::create(&archivo).unwrap();

        assert!(matches!(
            preparar_directorio(&archivo),
            Err(ErrorSalida::NoSePudoCrearDirectorio { .. })
        ));
    }

    #[test]
    fn guarda_un_archivo_por_orden_y_se_puede_releer() {
        let dir = TempDir::new().unwrap();
        let ordenes = ordenes(12);

        let resultado = guardar_ordenes(dir.path(), &ordenes);

        assert_eq!(resultado, ResultadoGuardado { guardados: 12, errores: 0 });
        for original in &ordenes {
            let ruta = dir.path().join(format!("{}.json", original.numero));
            let mut archivo = File::open(ruta).unwrap();
            let leida = orden::from_reader(&mut archivo).unwrap();
            assert_eq!(&leida, original);
        }
    }

    #[test]
    fn los_archivos_tienen_exactamente_los_campos_del_formato() {
        let dir = TempDir::new().unwrap();
        let ordenes = ordenes(5);
        guardar_ordenes(dir.path(), &ordenes);

        let obligatorios = [
            "order_number",
            "schecule_start_date",
            "schecule_end_date",
            "description",
            "status",
            "dependencies",
            "resources",
        ];
        let opcionales = ["actual_start_date", "actual_end_date"];

        fn verificar(valor: &serde_json::Value, obligatorios: &[&str], opcionales: &[&str]) {
            let objeto = valor.as_object().unwrap();
            for campo in obligatorios {
                assert!(objeto.contains_key(*campo), "falta {campo}");
            }
            for campo in objeto.keys() {
                assert!(
                    obligatorios.contains(&campo.as_str()) || opcionales.contains(&campo.as_str()),
                    "campo inesperado {campo}"
                );
            }
            if objeto.contains_key("actual_end_date") {
                assert!(objeto.contains_key("actual_start_date"));
            }
            for recurso in objeto["resources"].as_array().unwrap() {
                let recurso = recurso.as_object().unwrap();
                assert_eq!(recurso.len(), 5);
                assert!(recurso["resource_id"].is_u64());
                assert!(recurso["resource_quantity"].as_u64().unwrap() > 0);
            }
            for dep in objeto["dependencies"].as_array().unwrap() {
                verificar(dep, obligatorios, opcionales);
            }
        }

        for orden in &ordenes {
            let texto = fs::read_to_string(dir.path().join(nombre_archivo(orden))).unwrap();
            let valor: serde_json::Value = serde_json::from_str(&texto).unwrap();
            verificar(&valor, &obligatorios, &opcionales);
        }
    }

    #[test]
    fn un_archivo_fallido_no_corta_el_lote() {
        let dir = TempDir::new().unwrap();
        let ordenes = ordenes(3);
        fs::create_dir(dir.path().join(nombre_archivo(&ordenes[1]))).unwrap();

        let resultado = guardar_ordenes(dir.path(), &ordenes);

        assert_eq!(resultado, ResultadoGuardado { guardados: 2, errores: 1 });
        assert!(dir.path().join(nombre_archivo(&ordenes[2])).is_file());
    }
}
