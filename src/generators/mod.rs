//! Este modulo contiene la generacion de las ordenes sinteticas: el pozo de
//! dependencias reutilizables, los arboles de ordenes y el sorteo de fechas

pub mod fechas;
pub mod ordenes_gen;
pub mod pozo;
