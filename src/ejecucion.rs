//! Este modulo encadena una corrida completa del generador: valida la
//! configuracion, prepara el directorio, genera las ordenes, las guarda y
//! calcula las estadisticas.

use tracing::info;

use crate::config::Config;
use crate::errores::{Error, ErrorSalida};
use crate::estadisticas::Estadisticas;
use crate::generators::ordenes_gen::Generador;
use crate::serializador::{self, ResultadoGuardado};

/// Resultado de una corrida que llego a guardar los archivos
#[derive(Debug, Clone, PartialEq)]
pub struct Resumen {
    pub guardado: ResultadoGuardado,
    pub estadisticas: Estadisticas,
}

impl Resumen {
    /// Una corrida es exitosa solo si se escribieron todos los archivos
    /// # Errors
    /// * `ErrorSalida::ArchivosConErrores` si fallo al menos un archivo
    pub fn verificar(&self) -> Result<(), ErrorSalida> {
        if self.guardado.errores > 0 {
            return Err(ErrorSalida::ArchivosConErrores {
                errores: self.guardado.errores,
                total: self.guardado.errores + self.guardado.guardados,
            });
        }
        Ok(())
    }
}

/// Ejecuta la corrida completa. La configuracion se valida y el directorio se
/// crea antes de generar cualquier orden; los errores de escritura de archivos
/// individuales quedan contados en el resumen
/// # Errors
/// * `Error::ErrorDeConfiguracion` si la configuracion es invalida
/// * `Error::ErrorDeSalida` si no se puede crear el directorio de salida
pub fn ejecutar(config: &Config) -> Result<Resumen, Error> {
    let mut generador = Generador::desde_config(config)?;
    serializador::preparar_directorio(&config.directorio)?;

    let ordenes = generador.generar();
    info!(cantidad = ordenes.len(), "ordenes generadas");

    println!("\nGuardando las ordenes en archivos...");
    let guardado = serializador::guardar_ordenes(&config.directorio, &ordenes);
    let estadisticas = Estadisticas::calcular(&ordenes);

    Ok(Resumen {
        guardado,
        estadisticas,
    })
}
