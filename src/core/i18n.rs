//! Static Spanish/English text tables for the dashboard

use crate::core::error::PipelineError;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Language::Es => "es",
                Language::En => "en",
            }
        )
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Language::Es),
            "en" | "english" => Ok(Language::En),
            _ => Err(anyhow!("Unsupported language: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKey {
    Title,
    Subtitle,
    GapTitle,
    OfficialSell,
    ParallelBuy,
    GapUnavailable,
    InflationSection,
    InflationChartTitle,
    InflationCaption,
    InflationSource,
    UsdSection,
    UsdChartTitle,
    UsdCaption,
    UsdLatest,
    RatioSection,
    RatioChartTitle,
    RatioCaption,
    RatioInterpretation,
    RatioUnavailable,
    Covid,
    FernandezTakesOffice,
    MileiTakesOffice,
    SourcesTitle,
    SourcesBody,
    MethodologyBody,
    Date,
    Month,
    CpiGeneral,
    CpiCore,
    ExchangeRate,
    Ratio,
    Events,
    Fetching,
    NoRows,
    NetworkFailure,
    SchemaMismatch,
    InsufficientData,
    ConfigurationMissing,
}

impl TextKey {
    pub fn text(self, lang: Language) -> &'static str {
        match lang {
            Language::Es => self.spanish(),
            Language::En => self.english(),
        }
    }

    fn spanish(self) -> &'static str {
        match self {
            TextKey::Title => "Hola! Somos EconMind 🚀",
            TextKey::Subtitle => {
                "💡 Datos y análisis para que tomes mejores decisiones y mejores tu calidad de vida."
            }
            TextKey::GapTitle => "📊 Brecha Cambiaria",
            TextKey::OfficialSell => "💵 Dólar Oficial Venta",
            TextKey::ParallelBuy => "💵 Dólar Compra",
            TextKey::GapUnavailable => "❌ No se pudo calcular la brecha cambiaria.",
            TextKey::InflationSection => "📈 Inflación y Tipo de Cambio",
            TextKey::InflationChartTitle => "Evolución de la Inflación General y Núcleo - INDEC",
            TextKey::InflationCaption => {
                "📌 IPC General y Núcleo. Tasa de variación mensual. Nivel General. Nacional. Base dic 2016."
            }
            TextKey::InflationSource => "Fuente: INDEC.",
            TextKey::UsdSection => "💵 Tipo de Cambio USD",
            TextKey::UsdChartTitle => "Evolución del Tipo de Cambio USD (promedio mensual)",
            TextKey::UsdCaption => "Datos proporcionados por el BCRA.",
            TextKey::UsdLatest => "Último valor",
            TextKey::RatioSection => "📊 Ratio Tipo de Cambio vs IPC",
            TextKey::RatioChartTitle => "Ratio Tipo de Cambio vs IPC General",
            TextKey::RatioCaption => {
                "El ratio se calcula como el promedio mensual del Tipo de Cambio dividido por el IPC General."
            }
            TextKey::RatioInterpretation => {
                "📌 Interpretación: este ratio mide cuánto se ha depreciado el peso argentino en términos reales comparado con la inflación.\n\
                 - Si el ratio aumenta 📈, el dólar oficial crece más rápido que la inflación: mayor depreciación real del peso.\n\
                 - Si el ratio cae 📉, la inflación supera la variación del dólar: apreciación real del peso.\n\
                 💡 Ejemplo práctico: si en enero el dólar sube un 5% pero la inflación mensual es del 6%, el ratio bajará. \
                 En términos reales, el peso estaría perdiendo menos valor frente al dólar que contra los precios en la economía.\n\n\
                 🔍 Impacto en bienes transables vs. no transables:\n\
                 - Si la inflación es mayor que el aumento del dólar, los bienes importados tienden a encarecerse menos en pesos que los bienes y servicios locales.\n\
                 💡 Ejemplo práctico:\n\
                 - Un iPhone (bien transable) podría costar menos pesos que el mes anterior porque su precio está atado al dólar.\n\
                 - Ir a la peluquería (bien no transable) podría ser más caro en pesos, ya que estos servicios ajustan más rápido a la inflación local.\n\
                 📌 Conclusión: el precio relativo de los bienes transables sobre los no transables se abarató.\n\n\
                 💰 ¿Cómo podemos usar este ratio para tomar mejores decisiones?\n\
                 Este indicador nos ayuda a evaluar decisiones financieras clave, por ejemplo, en términos de ahorro, consumo e inversión."
            }
            TextKey::RatioUnavailable => "No hay datos suficientes para calcular el ratio.",
            TextKey::Covid => "😷 COVID-19",
            TextKey::FernandezTakesOffice => "✌️ Asume Fernández",
            TextKey::MileiTakesOffice => "🦁 Asume Milei",
            TextKey::SourcesTitle => "📊 🔍 Fuentes de Datos y Metodología",
            TextKey::SourcesBody => {
                "- Inflación (IPC General y Núcleo): API de INDEC (Datos Abiertos del Gobierno, datos.gob.ar).\n\
                 - Tipo de Cambio Oficial: API del Banco Central de la República Argentina (BCRA).\n\
                 - Cotizaciones del dólar: DolarApi."
            }
            TextKey::MethodologyBody => {
                "- Promedio mensual: los datos diarios del BCRA se agrupan para calcular un promedio mensual.\n\
                 - Limpieza y filtrado: se normalizan las fechas y se filtra la data desde diciembre de 2019.\n\
                 - Cálculo del Ratio: se divide el tipo de cambio promedio mensual por el IPC General."
            }
            TextKey::Date => "Fecha",
            TextKey::Month => "Mes",
            TextKey::CpiGeneral => "IPC General",
            TextKey::CpiCore => "IPC Núcleo",
            TextKey::ExchangeRate => "Tipo de Cambio",
            TextKey::Ratio => "Ratio Tipo de Cambio / IPC",
            TextKey::Events => "Eventos",
            TextKey::Fetching => "Obteniendo datos...",
            TextKey::NoRows => "Sin datos para el período analizado.",
            TextKey::NetworkFailure => "❌ Error al conectarse a la API",
            TextKey::SchemaMismatch => "❌ La estructura de los datos no es la esperada",
            TextKey::InsufficientData => "❌ Datos insuficientes",
            TextKey::ConfigurationMissing => "❌ Falta configuración",
        }
    }

    fn english(self) -> &'static str {
        match self {
            TextKey::Title => "Hi! We are EconMind 🚀",
            TextKey::Subtitle => {
                "💡 Data and analysis to help you make better decisions and improve your quality of life."
            }
            TextKey::GapTitle => "📊 Currency Gap",
            TextKey::OfficialSell => "💵 Official Dollar Sell",
            TextKey::ParallelBuy => "💵 Dollar Buy",
            TextKey::GapUnavailable => "❌ The currency gap could not be calculated.",
            TextKey::InflationSection => "📈 Inflation and Exchange Rate",
            TextKey::InflationChartTitle => "General and Core Inflation - INDEC",
            TextKey::InflationCaption => {
                "📌 General and Core CPI. Monthly rate of change. General Level. National. Base Dec 2016."
            }
            TextKey::InflationSource => "Source: INDEC.",
            TextKey::UsdSection => "💵 USD Exchange Rate",
            TextKey::UsdChartTitle => "USD Exchange Rate (monthly average)",
            TextKey::UsdCaption => "Data provided by the BCRA.",
            TextKey::UsdLatest => "Latest value",
            TextKey::RatioSection => "📊 Exchange Rate vs CPI Ratio",
            TextKey::RatioChartTitle => "Exchange Rate vs General CPI Ratio",
            TextKey::RatioCaption => {
                "The ratio is the monthly average exchange rate divided by the General CPI."
            }
            TextKey::RatioInterpretation => {
                "📌 Interpretation: this ratio measures how much the Argentine peso has depreciated in real terms compared to inflation.\n\
                 - If the ratio rises 📈, the official dollar grows faster than inflation: real depreciation of the peso.\n\
                 - If the ratio falls 📉, inflation outpaces the dollar: real appreciation of the peso.\n\
                 💡 Example: if in January the dollar rises 5% but monthly inflation is 6%, the ratio falls. \
                 In real terms the peso is losing less value against the dollar than against prices in the economy.\n\n\
                 🔍 Tradable vs. non-tradable goods:\n\
                 - When inflation exceeds the rise of the dollar, imported goods tend to get less expensive in pesos than local goods and services.\n\
                 💡 Example:\n\
                 - An iPhone (tradable good) could cost fewer pesos than the previous month because its price is tied to the dollar.\n\
                 - A haircut (non-tradable good) could cost more pesos, since these services adjust faster to local inflation.\n\
                 📌 Conclusion: tradable goods became relatively cheaper than non-tradable ones.\n\n\
                 💰 How can this ratio help make better decisions?\n\
                 It helps evaluate key financial decisions, for example around saving, spending and investing."
            }
            TextKey::RatioUnavailable => "Not enough data to calculate the ratio.",
            TextKey::Covid => "😷 COVID-19",
            TextKey::FernandezTakesOffice => "✌️ Fernández takes office",
            TextKey::MileiTakesOffice => "🦁 Milei takes office",
            TextKey::SourcesTitle => "📊 🔍 Data Sources and Methodology",
            TextKey::SourcesBody => {
                "- Inflation (General and Core CPI): INDEC API (Government Open Data, datos.gob.ar).\n\
                 - Official Exchange Rate: Central Bank of Argentina (BCRA) API.\n\
                 - Dollar quotes: DolarApi."
            }
            TextKey::MethodologyBody => {
                "- Monthly average: daily BCRA data is grouped into a monthly mean.\n\
                 - Cleaning and filtering: dates are normalized and data is kept from December 2019.\n\
                 - Ratio: the monthly average exchange rate is divided by the General CPI."
            }
            TextKey::Date => "Date",
            TextKey::Month => "Month",
            TextKey::CpiGeneral => "General CPI",
            TextKey::CpiCore => "Core CPI",
            TextKey::ExchangeRate => "Exchange Rate",
            TextKey::Ratio => "Exchange Rate / CPI Ratio",
            TextKey::Events => "Events",
            TextKey::Fetching => "Fetching data...",
            TextKey::NoRows => "No data for the analysis period.",
            TextKey::NetworkFailure => "❌ Could not reach the API",
            TextKey::SchemaMismatch => "❌ The data does not have the expected structure",
            TextKey::InsufficientData => "❌ Insufficient data",
            TextKey::ConfigurationMissing => "❌ Missing configuration",
        }
    }
}

/// User-facing rendering of a pipeline failure.
pub fn describe_error(err: &PipelineError, lang: Language) -> String {
    match err {
        PipelineError::NetworkFailure { provider, message } => {
            format!("{} ({provider}): {message}", TextKey::NetworkFailure.text(lang))
        }
        PipelineError::SchemaMismatch { provider, message } => {
            format!("{} ({provider}): {message}", TextKey::SchemaMismatch.text(lang))
        }
        PipelineError::InsufficientData(reason) => {
            format!("{}: {reason}", TextKey::InsufficientData.text(lang))
        }
        PipelineError::ConfigurationMissing(what) => {
            format!("{}: {what}", TextKey::ConfigurationMissing.text(lang))
        }
    }
}
