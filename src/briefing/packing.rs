use super::weather::Conditions;

const ESSENTIALS: [&str; 5] = [
    "Laptop",
    "Work Badge",
    "AirPods",
    "Webcam",
    "BART Parking or Amtrak Ticket Paid",
];

/// Essentials plus weather-dependent extras for the office forecast.
pub fn packing_list(forecast: Option<&Conditions>) -> Vec<String> {
    let mut items: Vec<String> = ESSENTIALS.iter().map(|s| s.to_string()).collect();

    if let Some(weather) = forecast {
        if weather.temp < 55.0 {
            items.push("Jacket".to_string());
        }
        if weather.condition.contains("rain") {
            items.push("Umbrella".to_string());
        }
        if weather.condition.contains("clear") && weather.temp > 75.0 {
            items.push("Sunglasses".to_string());
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather(temp: f64, condition: &str) -> Conditions {
        Conditions {
            temp,
            condition: condition.to_string(),
        }
    }

    #[test]
    fn no_forecast_gives_essentials() {
        assert_eq!(packing_list(None), ESSENTIALS);
    }

    #[test]
    fn cold_rain_adds_jacket_and_umbrella() {
        let items = packing_list(Some(&weather(50.0, "moderate rain")));
        assert_eq!(&items[5..], ["Jacket", "Umbrella"]);
    }

    #[test]
    fn hot_clear_adds_sunglasses() {
        let items = packing_list(Some(&weather(82.0, "clear sky")));
        assert_eq!(&items[5..], ["Sunglasses"]);
    }

    #[test]
    fn mild_clear_adds_nothing() {
        assert_eq!(packing_list(Some(&weather(75.0, "clear sky"))).len(), 5);
    }
}
