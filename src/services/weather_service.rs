use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::configs::Weather;

/// Supplementary data for one coordinate, from the external forecast API.
/// `api_bruta` carries the provider's current-weather block untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Enrichment {
    pub umidade_api: Option<f64>,
    pub temperatura_api: Option<f64>,
    pub api_bruta: Option<Value>,
    pub daily: Option<DailyForecast>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub weathercode: Vec<i32>,
}

#[derive(Debug, Clone, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    temperature_2m: Vec<f64>,
    #[serde(default)]
    relative_humidity_2m: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ForecastResponse {
    current_weather: Option<Value>,
    hourly: Option<HourlySeries>,
    daily: Option<DailyForecast>,
}

/// Forecast client for the per-station enrichment. Optional: built only
/// when the weather section enables it, so the reading feed works with no
/// external collaborator at all.
pub struct WeatherService {
    client: reqwest::Client,
    base_url: String,
    timezone: String,
}

impl WeatherService {
    pub fn from_settings(settings: &Weather) -> Option<Self> {
        settings.enabled.then(|| Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.clone(),
            timezone: settings.timezone.clone(),
        })
    }

    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Enrichment, reqwest::Error> {
        let response: ForecastResponse = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", "temperature_2m,relative_humidity_2m".to_string()),
                (
                    "daily",
                    "temperature_2m_max,temperature_2m_min,weathercode".to_string(),
                ),
                ("timezone", self.timezone.clone()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(enrichment_from(response))
    }
}

fn enrichment_from(response: ForecastResponse) -> Enrichment {
    Enrichment {
        umidade_api: response
            .hourly
            .as_ref()
            .and_then(|hourly| hourly.relative_humidity_2m.first().copied()),
        temperatura_api: response
            .hourly
            .as_ref()
            .and_then(|hourly| hourly.temperature_2m.first().copied()),
        api_bruta: response.current_weather,
        daily: response.daily,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_enrichment_takes_first_hourly_sample() {
        let response: ForecastResponse = serde_json::from_value(json!({
            "current_weather": {"temperature": 24.1, "weathercode": 3},
            "hourly": {
                "time": ["2024-01-01T00:00", "2024-01-01T01:00"],
                "temperature_2m": [21.4, 20.9],
                "relative_humidity_2m": [78.0, 81.0]
            },
            "daily": {
                "time": ["2024-01-01"],
                "temperature_2m_max": [29.3],
                "temperature_2m_min": [19.8],
                "weathercode": [61]
            }
        }))
        .unwrap();

        let enrichment = enrichment_from(response);

        assert_eq!(enrichment.umidade_api, Some(78.0));
        assert_eq!(enrichment.temperatura_api, Some(21.4));
        assert_eq!(enrichment.api_bruta.unwrap()["weathercode"], json!(3));
        let daily = enrichment.daily.unwrap();
        assert_eq!(daily.temperature_2m_max, vec![29.3]);
        assert_eq!(daily.weathercode, vec![61]);
    }

    #[test]
    fn test_enrichment_degrades_on_missing_blocks() {
        let response: ForecastResponse = serde_json::from_value(json!({})).unwrap();

        let enrichment = enrichment_from(response);

        assert!(enrichment.umidade_api.is_none());
        assert!(enrichment.temperatura_api.is_none());
        assert!(enrichment.api_bruta.is_none());
        assert!(enrichment.daily.is_none());
    }
}
