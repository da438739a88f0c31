//! Este modulo define tipos de errores que pueden darse en
//! la ejecucion

use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::aliases::{NumeroOrden, Profundidad};

/// Enumerativo que engloba a todos los tipos de errores posibles desde
/// todos los modulos
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuracion invalida: {0}")]
    ErrorDeConfiguracion(#[from] ErrorConfiguracion),
    #[error("{0}")]
    ErrorDeSalida(#[from] ErrorSalida),
    #[error("{0}")]
    ErrorDeParseo(#[from] ErrorDuranteParseo),
}

/// Enumerativo que define los errores de una configuracion mal formada.
/// Todos se detectan antes de generar cualquier orden
#[derive(Debug, Error)]
pub enum ErrorConfiguracion {
    #[error("la probabilidad de reuso debe estar entre 0 y 1, se recibio {0}")]
    ProbabilidadInvalida(f64),
    #[error("la profundidad maxima es {maxima}, se pidio {pedida}")]
    ProfundidadExcedida {
        pedida: Profundidad,
        maxima: Profundidad,
    },
    #[error("cada orden necesita al menos un recurso, el maximo de recursos no puede ser 0")]
    SinRecursos,
    #[error("se pidieron hasta {pedidos} recursos por orden, el maximo es {maximo}")]
    RecursosExcedidos { pedidos: usize, maximo: usize },
    #[error("se pidieron hasta {pedidas} dependencias por orden, el maximo es {maximo}")]
    DependenciasExcedidas { pedidas: usize, maximo: usize },
    #[error("la corrida podria generar mas de {maximo} ordenes")]
    CorridaDemasiadoGrande { maximo: NumeroOrden },
    #[error("el conjunto de estados no puede estar vacio")]
    SinEstados,
    #[error("el horizonte de fechas es invalido: {inicio} es posterior a {fin}")]
    HorizonteInvalido { inicio: NaiveDate, fin: NaiveDate },
    #[error("el catalogo de recursos no tiene entradas")]
    CatalogoVacio,
    #[error("el tipo de recurso '{0}' no tiene nombres candidatos")]
    EntradaSinNombres(String),
    #[error("el tipo de recurso '{0}' no tiene unidades")]
    EntradaSinUnidades(String),
    #[error("el tipo de recurso '{tipo}' tiene un rango de cantidades invalido ({minimo}..={maximo})")]
    RangoCantidadInvalido { tipo: String, minimo: u32, maximo: u32 },
    #[error("el rango de ordenes principales desborda: inicio {inicio} con {cantidad} ordenes")]
    RangoDesbordado { inicio: NumeroOrden, cantidad: usize },
    #[error("los numeros de dependencia desde {inicio} no alcanzan para el peor caso de la corrida")]
    RangoDependenciasDesbordado { inicio: NumeroOrden },
    #[error("no se pudo leer el catalogo de recursos: {0}")]
    CatalogoIlegible(#[from] ErrorDuranteParseo),
}

/// Enumerativo que define los errores al escribir los archivos de salida
#[derive(Debug, Error)]
pub enum ErrorSalida {
    #[error("no se pudo crear el directorio de salida {}: {fuente}", ruta.display())]
    NoSePudoCrearDirectorio {
        ruta: PathBuf,
        #[source]
        fuente: io::Error,
    },
    #[error("fallo la escritura de {errores} de {total} archivos")]
    ArchivosConErrores { errores: usize, total: usize },
}

/// Enumerativo que define todos los errores que pueden darse
/// en el parseo de los archivos de ordenes y de catalogo
#[derive(Debug, Error)]
pub enum ErrorDuranteParseo {
    #[error("no se pudo abrir el archivo: {0}")]
    NoSePudoAbrirArchivo(#[from] io::Error),
    #[error("formato de archivo invalido: {0}")]
    FormatoArchivoInvalido(#[from] serde_json::Error),
}
