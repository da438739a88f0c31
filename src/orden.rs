//! Este modulo define la estructura de las ordenes sinteticas, junto con sus
//! recursos y estados. Los nombres de los campos serializados respetan el formato
//! que espera el sistema que consume los archivos, incluido el historico
//! `schecule_*` de las fechas planificadas.

use std::{fmt, io::Read};

use chrono::NaiveDate;
use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize};

use crate::aliases::{CantidadRecurso, IdRecurso, NumeroOrden, Profundidad};

/// Formato de las fechas dentro de los archivos
pub const FORMATO_FECHA: &str = "%Y-%m-%d";

/// Estados posibles de una orden. El estado vacio se serializa como `""`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Estado {
    #[serde(alias = "Started")]
    Started,
    Completed,
    Unexecutable,
    Pending,
    #[value(name = "in_progress")]
    InProgress,
    #[serde(rename = "")]
    Empty,
}

impl Estado {
    /// Todos los estados, en el orden en que se listan por defecto
    pub const TODOS: [Estado; 6] = [
        Estado::Started,
        Estado::Completed,
        Estado::Unexecutable,
        Estado::Pending,
        Estado::InProgress,
        Estado::Empty,
    ];

    /// Representacion textual del estado, tal como aparece en los archivos
    pub fn as_str(&self) -> &'static str {
        match self {
            Estado::Started => "started",
            Estado::Completed => "completed",
            Estado::Unexecutable => "unexecutable",
            Estado::Pending => "pending",
            Estado::InProgress => "in_progress",
            Estado::Empty => "",
        }
    }

    /// Indica si el estado admite fecha de finalizacion real
    pub fn indica_finalizacion(&self) -> bool {
        matches!(self, Estado::Completed)
    }
}

impl fmt::Display for Estado {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Estado::Empty => write!(f, "(vacio)"),
            otro => write!(f, "{}", otro.as_str()),
        }
    }
}

/// Un recurso asignado a una orden
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Recurso {
    #[serde(rename = "resource_id")]
    pub id: IdRecurso,
    #[serde(rename = "resource_name")]
    pub nombre: String,
    #[serde(rename = "resource_type")]
    pub tipo: String,
    #[serde(rename = "resource_quantity")]
    pub cantidad: CantidadRecurso,
    #[serde(rename = "resource_unit")]
    pub unidad: String,
}

impl fmt::Display for Recurso {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "R{} {} ({}): {} {}",
            self.id,
            self.nombre,
            self.tipo,
            self.cantidad.to_string().yellow(),
            self.unidad
        )
    }
}

/// Una orden, con sus dependencias anidadas por valor
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Orden {
    #[serde(rename = "order_number")]
    pub numero: NumeroOrden,
    #[serde(rename = "schecule_start_date", alias = "schedule_start_date")]
    pub inicio_planificado: NaiveDate,
    #[serde(rename = "schecule_end_date", alias = "schedule_end_date")]
    pub fin_planificado: NaiveDate,
    #[serde(
        rename = "actual_start_date",
        default,
        deserialize_with = "fecha_opcional",
        skip_serializing_if = "Option::is_none"
    )]
    pub inicio_real: Option<NaiveDate>,
    #[serde(rename = "description")]
    pub descripcion: String,
    #[serde(rename = "status")]
    pub estado: Estado,
    #[serde(
        rename = "actual_end_date",
        default,
        deserialize_with = "fecha_opcional",
        skip_serializing_if = "Option::is_none"
    )]
    pub fin_real: Option<NaiveDate>,
    #[serde(rename = "dependencies", default)]
    pub dependencias: Vec<Orden>,
    #[serde(rename = "resources", default)]
    pub recursos: Vec<Recurso>,
}

impl Orden {
    /// Profundidad del subarbol con raiz en esta orden. Una orden sin
    /// dependencias tiene profundidad 0
    pub fn profundidad(&self) -> Profundidad {
        self.dependencias
            .iter()
            .map(|dep| dep.profundidad() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Recorre en preorden todas las dependencias del arbol (sin incluir a la
    /// raiz), llamando a `visitar` con cada una y su profundidad
    pub fn recorrer_dependencias(&self, visitar: &mut dyn FnMut(&Orden, Profundidad)) {
        fn recorrer(
            orden: &Orden,
            profundidad: Profundidad,
            visitar: &mut dyn FnMut(&Orden, Profundidad),
        ) {
            for dep in &orden.dependencias {
                visitar(dep, profundidad + 1);
                recorrer(dep, profundidad + 1, visitar);
            }
        }
        recorrer(self, 0, visitar);
    }
}

impl fmt::Display for Orden {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let estado = match self.estado {
            Estado::Pending => self.estado.to_string().red(),
            _ => self.estado.to_string().green(),
        };
        write!(f, "Orden {} [{}]", self.numero.to_string().blue(), estado)?;
        write!(
            f,
            " {} -> {}",
            self.inicio_planificado.format(FORMATO_FECHA),
            self.fin_planificado.format(FORMATO_FECHA)
        )
    }
}

/// Descripcion de una orden segun su profundidad: la raiz es de primer nivel
pub fn descripcion_de_nivel(profundidad: Profundidad) -> String {
    let nivel = u32::from(profundidad) + 1;
    let sufijo = match (nivel % 10, nivel % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("This is a {nivel}{sufijo} level order")
}

/// Las fechas reales ausentes pueden venir omitidas, en `null` o como cadena vacia
fn fecha_opcional<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let texto: Option<String> = Option::deserialize(deserializer)?;
    match texto.as_deref() {
        None | Some("") => Ok(None),
        Some(fecha) => NaiveDate::parse_from_str(fecha, FORMATO_FECHA)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Parsea un lector de bytes (en formato json) en una orden. Simplemente
/// encapsula las funcionalidades de la libreria de json.
pub fn from_reader(reader: &mut dyn Read) -> serde_json::Result<Orden> {
    serde_json::from_reader(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(texto: &str) -> NaiveDate {
        NaiveDate::parse_from_str(texto, FORMATO_FECHA).unwrap()
    }

    fn hoja(numero: NumeroOrden) -> Orden {
        Orden {
            numero,
            inicio_planificado: fecha("2024-01-10"),
            fin_planificado: fecha("2024-07-01"),
            inicio_real: None,
            descripcion: descripcion_de_nivel(1),
            estado: Estado::Pending,
            fin_real: None,
            dependencias: vec![],
            recursos: vec![],
        }
    }

    #[test]
    fn descripciones_por_nivel() {
        assert_eq!(descripcion_de_nivel(0), "This is a 1st level order");
        assert_eq!(descripcion_de_nivel(1), "This is a 2nd level order");
        assert_eq!(descripcion_de_nivel(2), "This is a 3rd level order");
        assert_eq!(descripcion_de_nivel(3), "This is a 4th level order");
    }

    #[test]
    fn serializa_con_los_nombres_del_formato() {
        let mut orden = hoja(80000);
        orden.estado = Estado::Empty;
        orden.recursos.push(Recurso {
            id: 7,
            nombre: "Prime Fabrication".to_string(),
            tipo: "Fab shop".to_string(),
            cantidad: 3,
            unidad: "day".to_string(),
        });

        let valor = serde_json::to_value(&orden).unwrap();
        let objeto = valor.as_object().unwrap();

        assert_eq!(objeto["order_number"], 80000);
        assert_eq!(objeto["schecule_start_date"], "2024-01-10");
        assert_eq!(objeto["schecule_end_date"], "2024-07-01");
        assert_eq!(objeto["status"], "");
        assert!(!objeto.contains_key("actual_start_date"));
        assert!(!objeto.contains_key("actual_end_date"));
        assert_eq!(objeto["resources"][0]["resource_unit"], "day");
        assert_eq!(objeto["resources"][0]["resource_quantity"], 3);
    }

    #[test]
    fn lee_fechas_vacias_y_estado_capitalizado() {
        let json = r#"{
            "order_number": 12345,
            "schecule_start_date": "2024-02-01",
            "schecule_end_date": "2024-09-01",
            "actual_start_date": "",
            "description": "This is a 2nd level order",
            "status": "Started"
        }"#;
        let orden = from_reader(&mut json.as_bytes()).unwrap();

        assert_eq!(orden.estado, Estado::Started);
        assert_eq!(orden.inicio_real, None);
        assert!(orden.dependencias.is_empty());
        assert!(orden.recursos.is_empty());
    }

    #[test]
    fn acepta_claves_con_la_ortografia_correcta() {
        let json = r#"{
            "order_number": 1,
            "schedule_start_date": "2024-02-01",
            "schedule_end_date": "2024-09-01",
            "description": "x",
            "status": "in_progress"
        }"#;
        let orden = from_reader(&mut json.as_bytes()).unwrap();

        assert_eq!(orden.estado, Estado::InProgress);
        assert_eq!(orden.fin_planificado, fecha("2024-09-01"));
    }

    #[test]
    fn recorre_dependencias_con_su_profundidad() {
        let mut medio = hoja(2);
        medio.dependencias.push(hoja(3));
        let mut raiz = hoja(1);
        raiz.dependencias.push(medio);
        raiz.dependencias.push(hoja(4));

        let mut visitados = Vec::new();
        raiz.recorrer_dependencias(&mut |orden, profundidad| {
            visitados.push((orden.numero, profundidad))
        });

        assert_eq!(visitados, vec![(2, 1), (3, 2), (4, 1)]);
        assert_eq!(raiz.profundidad(), 2);
    }
}
