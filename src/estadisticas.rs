//! Este modulo calcula estadisticas sobre las dependencias de un lote de
//! ordenes: cuantas instancias hay, cuantos numeros distintos aparecen y
//! cuales se reutilizaron mas.

use std::fmt;

use colored::Colorize;

use crate::aliases::{NumeroOrden, TablaOcurrencias};
use crate::orden::Orden;

/// Cantidad de dependencias mas reutilizadas que se informan
pub const TOP_REUTILIZADAS: usize = 5;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Estadisticas {
    pub ordenes_principales: usize,
    /// Instancias de dependencia en todos los arboles, a cualquier profundidad
    pub total_dependencias: usize,
    pub dependencias_unicas: usize,
    /// Numeros de dependencia que aparecen mas de una vez
    pub dependencias_reutilizadas: usize,
    /// Numero de orden y apariciones, de mayor a menor. Los empates se
    /// ordenan por numero de orden ascendente
    pub mas_reutilizadas: Vec<(NumeroOrden, usize)>,
}

impl Estadisticas {
    /// Recorre todos los arboles y cuenta las apariciones de cada dependencia
    pub fn calcular(ordenes: &[Orden]) -> Self {
        let ocurrencias = contar_ocurrencias(ordenes);

        let mut reutilizadas: Vec<(NumeroOrden, usize)> = ocurrencias
            .iter()
            .filter(|(_, veces)| **veces > 1)
            .map(|(numero, veces)| (*numero, *veces))
            .collect();
        // la tabla ya viene ordenada por numero y el sort es estable
        reutilizadas.sort_by(|a, b| b.1.cmp(&a.1));

        Self {
            ordenes_principales: ordenes.len(),
            total_dependencias: ocurrencias.values().sum(),
            dependencias_unicas: ocurrencias.len(),
            dependencias_reutilizadas: reutilizadas.len(),
            mas_reutilizadas: reutilizadas.into_iter().take(TOP_REUTILIZADAS).collect(),
        }
    }
}

/// Cuenta cuantas veces aparece cada numero de orden entre las dependencias
pub fn contar_ocurrencias(ordenes: &[Orden]) -> TablaOcurrencias {
    let mut tabla = TablaOcurrencias::new();
    for orden in ordenes {
        orden.recorrer_dependencias(&mut |dep, _| {
            *tabla.entry(dep.numero).or_insert(0) += 1;
        });
    }
    tabla
}

impl fmt::Display for Estadisticas {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", "Estadisticas:".bold())?;
        writeln!(
            f,
            "   Ordenes principales: {}",
            self.ordenes_principales.to_string().blue()
        )?;
        writeln!(
            f,
            "   Instancias de dependencias: {}",
            self.total_dependencias.to_string().blue()
        )?;
        writeln!(
            f,
            "   Dependencias unicas: {}",
            self.dependencias_unicas.to_string().blue()
        )?;
        write!(
            f,
            "   Dependencias reutilizadas: {}",
            self.dependencias_reutilizadas.to_string().blue()
        )?;

        if !self.mas_reutilizadas.is_empty() {
            write!(f, "\n\n{}", "Dependencias mas reutilizadas:".bold())?;
            for (numero, veces) in &self.mas_reutilizadas {
                write!(
                    f,
                    "\n   Orden {}: usada {} veces",
                    numero.to_string().blue(),
                    veces
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::generators::ordenes_gen::Generador;
    use crate::orden::{descripcion_de_nivel, Estado};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn orden(numero: NumeroOrden, dependencias: Vec<Orden>) -> Orden {
        let fecha = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Orden {
            numero,
            inicio_planificado: fecha,
            fin_planificado: fecha,
            inicio_real: None,
            descripcion: descripcion_de_nivel(0),
            estado: Estado::Pending,
            fin_real: None,
            dependencias,
            recursos: vec![],
        }
    }

    #[test]
    fn sin_ordenes_todo_en_cero() {
        assert_eq!(Estadisticas::calcular(&[]), Estadisticas::default());
    }

    #[test]
    fn cuenta_dependencias_anidadas() {
        let ordenes = vec![
            orden(80000, vec![orden(10, vec![orden(11, vec![])]), orden(12, vec![])]),
            orden(80001, vec![orden(10, vec![orden(13, vec![])])]),
        ];

        let estadisticas = Estadisticas::calcular(&ordenes);

        assert_eq!(estadisticas.ordenes_principales, 2);
        assert_eq!(estadisticas.total_dependencias, 5);
        assert_eq!(estadisticas.dependencias_unicas, 4);
        assert_eq!(estadisticas.dependencias_reutilizadas, 1);
        assert_eq!(estadisticas.mas_reutilizadas, vec![(10, 2)]);
    }

    #[test]
    fn ranking_ordenado_por_veces_y_desempate_por_numero() {
        let dependencias = |numeros: &[NumeroOrden]| -> Vec<Orden> {
            numeros.iter().map(|n| orden(*n, vec![])).collect()
        };
        let ordenes = vec![
            orden(80000, dependencias(&[30, 20, 10, 40, 50, 60])),
            orden(80001, dependencias(&[30, 20, 10, 40, 50, 60])),
            orden(80002, dependencias(&[30, 60, 7])),
        ];

        let estadisticas = Estadisticas::calcular(&ordenes);

        assert_eq!(estadisticas.dependencias_reutilizadas, 6);
        assert_eq!(
            estadisticas.mas_reutilizadas,
            vec![(30, 3), (60, 3), (10, 2), (20, 2), (40, 2)]
        );
    }

    #[test]
    fn con_reuso_hay_menos_unicas_que_instancias() {
        let config = Config {
            cantidad: 100,
            tam_pozo: 50,
            probabilidad_reuso: 0.7,
            ..Config::default()
        };
        let ordenes = Generador::new(&config, StdRng::seed_from_u64(70))
            .unwrap()
            .generar();

        let estadisticas = Estadisticas::calcular(&ordenes);

        assert!(estadisticas.total_dependencias > config.tam_pozo);
        assert!(estadisticas.dependencias_unicas < estadisticas.total_dependencias);
        assert!(estadisticas.dependencias_reutilizadas > 0);
        assert!(estadisticas.mas_reutilizadas.len() <= TOP_REUTILIZADAS);
    }

    #[test]
    fn pozo_vacio_no_reutiliza_nada() {
        let config = Config {
            tam_pozo: 0,
            probabilidad_reuso: 0.7,
            ..Config::default()
        };
        let ordenes = Generador::new(&config, StdRng::seed_from_u64(71))
            .unwrap()
            .generar();

        let estadisticas = Estadisticas::calcular(&ordenes);

        assert!(estadisticas.total_dependencias >= 100);
        assert_eq!(estadisticas.dependencias_unicas, estadisticas.total_dependencias);
        assert_eq!(estadisticas.dependencias_reutilizadas, 0);
        assert!(estadisticas.mas_reutilizadas.is_empty());
    }
}
