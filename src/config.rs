//! Este modulo define la configuracion de una corrida del generador, junto
//! con el catalogo de recursos y los argumentos de linea de comandos de los
//! que se construye. La configuracion se valida completa antes de generar
//! cualquier orden.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::aliases::{CantidadRecurso, NumeroOrden, Profundidad};
use crate::errores::{ErrorConfiguracion, ErrorDuranteParseo};
use crate::orden::Estado;
use crate::{
    MAX_DEPENDENCIAS_POR_ORDEN, MAX_ORDENES_POR_CORRIDA, MAX_RECURSOS_POR_ORDEN,
    PROFUNDIDAD_MAXIMA,
};

/// Un tipo de recurso junto con los nombres, unidades y cantidades plausibles
/// para ese tipo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntradaCatalogo {
    pub tipo: String,
    pub nombres: Vec<String>,
    pub unidades: Vec<String>,
    pub cantidad_minima: CantidadRecurso,
    pub cantidad_maxima: CantidadRecurso,
}

impl EntradaCatalogo {
    fn new(
        tipo: &str,
        nombres: &[&str],
        unidades: &[&str],
        cantidades: (CantidadRecurso, CantidadRecurso),
    ) -> Self {
        Self {
            tipo: tipo.to_string(),
            nombres: nombres.iter().map(|n| n.to_string()).collect(),
            unidades: unidades.iter().map(|u| u.to_string()).collect(),
            cantidad_minima: cantidades.0,
            cantidad_maxima: cantidades.1,
        }
    }
}

/// Catalogo de recursos del que se sortean los recursos de cada orden.
/// En json es simplemente una lista de entradas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogoRecursos {
    entradas: Vec<EntradaCatalogo>,
}

impl CatalogoRecursos {
    /// Crea un catalogo con las entradas dadas, sin validarlas
    pub fn new(entradas: Vec<EntradaCatalogo>) -> Self {
        Self { entradas }
    }

    /// Lee un catalogo desde un archivo json
    pub fn desde_archivo(ruta: &Path) -> Result<Self, ErrorDuranteParseo> {
        let mut archivo = File::open(ruta)?;
        let catalogo = serde_json::from_reader(&mut archivo)?;
        Ok(catalogo)
    }

    pub fn entradas(&self) -> &[EntradaCatalogo] {
        &self.entradas
    }

    /// Verifica que se pueda sortear un recurso de cualquier entrada
    /// # Errors
    /// * `ErrorConfiguracion::CatalogoVacio` si no hay entradas
    /// * `ErrorConfiguracion::EntradaSinNombres` / `EntradaSinUnidades` si a una entrada le faltan candidatos
    /// * `ErrorConfiguracion::RangoCantidadInvalido` si el minimo es 0 o supera al maximo
    pub fn validar(&self) -> Result<(), ErrorConfiguracion> {
        if self.entradas.is_empty() {
            return Err(ErrorConfiguracion::CatalogoVacio);
        }
        for entrada in &self.entradas {
            if entrada.nombres.is_empty() {
                return Err(ErrorConfiguracion::EntradaSinNombres(entrada.tipo.clone()));
            }
            if entrada.unidades.is_empty() {
                return Err(ErrorConfiguracion::EntradaSinUnidades(entrada.tipo.clone()));
            }
            if entrada.cantidad_minima == 0 || entrada.cantidad_minima > entrada.cantidad_maxima {
                return Err(ErrorConfiguracion::RangoCantidadInvalido {
                    tipo: entrada.tipo.clone(),
                    minimo: entrada.cantidad_minima,
                    maximo: entrada.cantidad_maxima,
                });
            }
        }
        Ok(())
    }
}

impl Default for CatalogoRecursos {
    fn default() -> Self {
        Self::new(vec![
            EntradaCatalogo::new(
                "Paint shop",
                &[
                    "Metro Paint Center",
                    "Industrial Coating Co",
                    "Elite Finishing",
                    "Precision Paint Works",
                ],
                &["day", "hour"],
                (1, 10),
            ),
            EntradaCatalogo::new(
                "Fab shop",
                &[
                    "Prime Fabrication",
                    "Steel Works LLC",
                    "Custom Metal Works",
                    "Superior Fab",
                ],
                &["day", "hour", "piece"],
                (1, 25),
            ),
            EntradaCatalogo::new(
                "Assembly shop",
                &[
                    "Precision Assembly",
                    "Advanced Manufacturing",
                    "Apex Manufacturing",
                    "Premier Assembly",
                ],
                &["day", "hour", "piece"],
                (1, 20),
            ),
            EntradaCatalogo::new(
                "Quality Control",
                &["Quality First Labs", "Industrial Solutions"],
                &["hour", "batch"],
                (1, 8),
            ),
            EntradaCatalogo::new(
                "Packaging",
                &["PackRight Solutions", "TechPak Industries", "Quick Pack Pro"],
                &["piece", "batch"],
                (1, 25),
            ),
            EntradaCatalogo::new(
                "Shipping",
                &[
                    "FastShip Logistics",
                    "Reliable Transport",
                    "Global Logistics",
                ],
                &["day", "batch"],
                (1, 5),
            ),
        ])
    }
}

/// Configuracion completa de una corrida
#[derive(Debug, Clone)]
pub struct Config {
    /// Directorio donde se escriben los archivos
    pub directorio: PathBuf,
    /// Cantidad de ordenes principales
    pub cantidad: usize,
    /// Cantidad de ordenes de dependencia reutilizables
    pub tam_pozo: usize,
    /// Primer numero de orden principal
    pub inicio_principales: NumeroOrden,
    /// Primer numero de orden de dependencia
    pub inicio_dependencias: NumeroOrden,
    pub probabilidad_reuso: f64,
    pub profundidad_maxima: Profundidad,
    pub max_dependencias: usize,
    pub max_recursos: usize,
    pub estados: Vec<Estado>,
    pub catalogo: CatalogoRecursos,
    /// Primer y ultimo dia en que pueden caer las fechas generadas
    pub horizonte: (NaiveDate, NaiveDate),
    pub semilla: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directorio: PathBuf::from("data"),
            cantidad: 100,
            tam_pozo: 50,
            inicio_principales: 80000,
            inicio_dependencias: 10000,
            probabilidad_reuso: 0.7,
            profundidad_maxima: PROFUNDIDAD_MAXIMA,
            max_dependencias: 3,
            max_recursos: 5,
            estados: Estado::TODOS.to_vec(),
            catalogo: CatalogoRecursos::default(),
            horizonte: horizonte_por_defecto(),
            semilla: None,
        }
    }
}

fn horizonte_por_defecto() -> (NaiveDate, NaiveDate) {
    let inicio = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let fin = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(inicio);
    (inicio, fin)
}

impl Config {
    /// Ultimo numero (exclusivo) del rango de ordenes principales
    pub fn fin_principales(&self) -> NumeroOrden {
        self.inicio_principales + self.cantidad as NumeroOrden
    }

    /// Valida la configuracion entera, devolviendo el primer problema encontrado
    pub fn validar(&self) -> Result<(), ErrorConfiguracion> {
        if !(0.0..=1.0).contains(&self.probabilidad_reuso) {
            return Err(ErrorConfiguracion::ProbabilidadInvalida(
                self.probabilidad_reuso,
            ));
        }
        if self.profundidad_maxima > PROFUNDIDAD_MAXIMA {
            return Err(ErrorConfiguracion::ProfundidadExcedida {
                pedida: self.profundidad_maxima,
                maxima: PROFUNDIDAD_MAXIMA,
            });
        }
        if self.max_recursos == 0 {
            return Err(ErrorConfiguracion::SinRecursos);
        }
        if self.max_recursos > MAX_RECURSOS_POR_ORDEN {
            return Err(ErrorConfiguracion::RecursosExcedidos {
                pedidos: self.max_recursos,
                maximo: MAX_RECURSOS_POR_ORDEN,
            });
        }
        if self.max_dependencias > MAX_DEPENDENCIAS_POR_ORDEN {
            return Err(ErrorConfiguracion::DependenciasExcedidas {
                pedidas: self.max_dependencias,
                maximo: MAX_DEPENDENCIAS_POR_ORDEN,
            });
        }
        if self.estados.is_empty() {
            return Err(ErrorConfiguracion::SinEstados);
        }
        if self.horizonte.0 > self.horizonte.1 {
            return Err(ErrorConfiguracion::HorizonteInvalido {
                inicio: self.horizonte.0,
                fin: self.horizonte.1,
            });
        }
        self.catalogo.validar()?;

        self.inicio_principales
            .checked_add(self.cantidad as NumeroOrden)
            .ok_or(ErrorConfiguracion::RangoDesbordado {
                inicio: self.inicio_principales,
                cantidad: self.cantidad,
            })?;

        let total = self
            .peor_caso_dependencias()
            .and_then(|peor| peor.checked_add(self.cantidad as NumeroOrden))
            .filter(|total| *total <= MAX_ORDENES_POR_CORRIDA)
            .ok_or(ErrorConfiguracion::CorridaDemasiadoGrande {
                maximo: MAX_ORDENES_POR_CORRIDA,
            })?;

        self.inicio_dependencias
            .checked_add(total)
            .ok_or(ErrorConfiguracion::RangoDependenciasDesbordado {
                inicio: self.inicio_dependencias,
            })?;

        Ok(())
    }

    /// Cota de la cantidad de numeros de dependencia que puede consumir una
    /// corrida: el pozo mas un arbol completo por cada orden principal
    fn peor_caso_dependencias(&self) -> Option<NumeroOrden> {
        let ramas = self.max_dependencias as NumeroOrden;
        let mut por_arbol: NumeroOrden = 0;
        let mut nivel: NumeroOrden = 1;
        for _ in 0..self.profundidad_maxima {
            nivel = nivel.checked_mul(ramas)?;
            por_arbol = por_arbol.checked_add(nivel)?;
        }
        por_arbol
            .checked_mul(self.cantidad as NumeroOrden)?
            .checked_add(self.tam_pozo as NumeroOrden)
    }
}

/// Argumentos del generador de ordenes sinteticas
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Argumentos {
    /// Directorio donde se guardan los archivos generados
    #[arg(short, long, default_value = "data")]
    directorio: PathBuf,

    /// Cantidad de ordenes principales a generar
    #[arg(short, long, default_value_t = 100)]
    cantidad: usize,

    /// Cantidad de ordenes de dependencia reutilizables
    #[arg(short, long, default_value_t = 50)]
    pozo: usize,

    /// Numero de la primer orden principal
    #[arg(short, long, default_value_t = 80000)]
    inicio: NumeroOrden,

    #[arg(long, default_value_t = 10000)]
    inicio_dependencias: NumeroOrden,

    /// Probabilidad de reutilizar una orden del pozo en cada dependencia
    #[arg(short, long, default_value_t = 0.7)]
    reuso: f64,

    #[arg(long, default_value_t = PROFUNDIDAD_MAXIMA)]
    profundidad: Profundidad,

    #[arg(long, default_value_t = 3)]
    max_dependencias: usize,

    #[arg(long, default_value_t = 5)]
    max_recursos: usize,

    /// Estados a sortear, separados por coma. Por defecto todos
    #[arg(short, long, value_enum, value_delimiter = ',')]
    estados: Vec<Estado>,

    /// Archivo json con el catalogo de recursos
    #[arg(long)]
    catalogo: Option<PathBuf>,

    /// Semilla para obtener corridas reproducibles
    #[arg(short, long)]
    semilla: Option<u64>,
}

impl TryFrom<Argumentos> for Config {
    type Error = ErrorConfiguracion;

    fn try_from(args: Argumentos) -> Result<Self, Self::Error> {
        let catalogo = match &args.catalogo {
            Some(ruta) => CatalogoRecursos::desde_archivo(ruta)?,
            None => CatalogoRecursos::default(),
        };
        let estados = if args.estados.is_empty() {
            Estado::TODOS.to_vec()
        } else {
            args.estados
        };

        let config = Config {
            directorio: args.directorio,
            cantidad: args.cantidad,
            tam_pozo: args.pozo,
            inicio_principales: args.inicio,
            inicio_dependencias: args.inicio_dependencias,
            probabilidad_reuso: args.reuso,
            profundidad_maxima: args.profundidad,
            max_dependencias: args.max_dependencias,
            max_recursos: args.max_recursos,
            estados,
            catalogo,
            semilla: args.semilla,
            ..Config::default()
        };
        config.validar()?;
        Ok(config)
    }
}
