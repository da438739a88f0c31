use std::ops::RangeInclusive;

use aliases::{IdRecurso, NumeroOrden, Profundidad};

pub mod aliases;
pub mod config;
pub mod ejecucion;
pub mod errores;
pub mod estadisticas;
pub mod generators;
pub mod lector;
pub mod orden;
pub mod registro;
pub mod serializador;

/// Profundidad maxima que puede tener un arbol de ordenes. La orden principal
/// esta en la profundidad 0
pub const PROFUNDIDAD_MAXIMA: Profundidad = 3;

/// Maxima cantidad de dependencias directas que puede tener una orden
pub const MAX_DEPENDENCIAS_POR_ORDEN: usize = 10;

/// Maxima cantidad de recursos que puede tener una orden
pub const MAX_RECURSOS_POR_ORDEN: usize = 50;

/// Cota de ordenes (principales y dependencias nuevas) que puede generar una corrida
pub const MAX_ORDENES_POR_CORRIDA: NumeroOrden = 10_000_000;

/// Rango de los identificadores de recurso sorteados
pub const RANGO_ID_RECURSO: RangeInclusive<IdRecurso> = 1..=1000;

/// Cada cuantos archivos guardados se informa el progreso
pub const INTERVALO_PROGRESO: usize = 10;
