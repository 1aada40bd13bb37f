use crate::core::{Instance, InstanceDocument};
use anyhow::{Context, Result};
use std::io::{Read, Write};

/// A structure used to read an instance from its JSON document.
///
/// The costs are read from the document; they are not computed again from the positions.
#[derive(Default)]
pub struct InstanceJsonReader;

impl InstanceJsonReader {
    /// Reads the document and builds the instance it describes.
    pub fn read<R>(&self, reader: R) -> Result<Instance>
    where
        R: Read,
    {
        let document = self.read_document(reader)?;
        Instance::try_from(&document).context("while building an instance from its document")
    }

    /// Reads the document, without checking it describes a valid instance.
    pub fn read_document<R>(&self, reader: R) -> Result<InstanceDocument>
    where
        R: Read,
    {
        serde_json::from_reader(reader).context("while parsing an instance document")
    }
}

/// A structure used to write the JSON document of an instance.
#[derive(Default)]
pub struct InstanceJsonWriter;

impl InstanceJsonWriter {
    /// Writes the document of the instance, pretty printed.
    pub fn write(&self, writer: &mut dyn Write, instance: &Instance) -> Result<()> {
        let context = "while writing an instance document";
        serde_json::to_writer_pretty(&mut *writer, &InstanceDocument::from(instance))
            .context(context)?;
        writeln!(writer).context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{
            CostRounding, DestinationKind, DestinationPolicy, EncodingError, Passenger, Position,
            ScenarioGenerator, Vehicle, Weights,
        },
        encodings::{EncodingOptions, Modeling},
        io::XcspWriter,
    };
    use std::{
        fs::File,
        io::{BufReader, BufWriter, Seek, SeekFrom},
    };

    #[test]
    fn test_write() {
        let instance = Instance::from_positions(
            "small",
            vec![Vehicle::new("v1", 1, Position::new(0., 0.))],
            vec![Passenger::new("p1", Position::new(3., 4.))],
            DestinationPolicy::Common(Position::new(3., 0.)),
            Weights::default(),
            CostRounding::NearestInteger,
        )
        .unwrap();
        let mut writer = BufWriter::new(Vec::new());
        InstanceJsonWriter.write(&mut writer, &instance).unwrap();
        let expected = r#"{
  "name": "small",
  "vehicles": [
    {
      "id": "v1",
      "capacity": 1,
      "pos": {
        "x": 0.0,
        "y": 0.0
      }
    }
  ],
  "passengers": [
    "p1"
  ],
  "passenger_positions": {
    "p1": {
      "x": 3.0,
      "y": 4.0
    }
  },
  "costs": {
    "v1": {
      "p1": 9
    }
  },
  "destination_mode": "common",
  "destination": {
    "x": 3.0,
    "y": 0.0
  },
  "pickup_weight": 1.0,
  "dropoff_weight": 1.0
}
"#;
        assert_eq!(
            expected,
            String::from_utf8(writer.into_inner().unwrap()).unwrap()
        );
    }

    #[test]
    fn test_read_errors() {
        let missing_capacity = r#"{"vehicles": [{"id": "v1", "pos": {"x": 0, "y": 0}}], "passengers": []}"#;
        let err = InstanceJsonReader
            .read(missing_capacity.as_bytes())
            .unwrap_err();
        assert_eq!(
            Some(&EncodingError::MissingCapacity {
                vehicle: "v1".to_string()
            }),
            err.downcast_ref::<EncodingError>()
        );
        assert!(InstanceJsonReader.read("{".as_bytes()).is_err());
        assert!(InstanceJsonReader
            .read(r#"{"vehicles": []}"#.as_bytes())
            .is_err());
    }

    #[test]
    fn test_default_name() {
        let instance = InstanceJsonReader
            .read(r#"{"vehicles": [], "passengers": []}"#.as_bytes())
            .unwrap();
        assert_eq!("ride_sharing", instance.name());
    }

    #[test]
    fn test_file_round_trip_gives_identical_encodings() {
        let generator = ScenarioGenerator {
            n_vehicles: 3,
            capacity: 2,
            n_passengers: 5,
            destination: DestinationKind::PerPassenger,
            rounding: CostRounding::Keep,
            ..Default::default()
        };
        let instance = generator.generate("file round trip").unwrap();
        let mut file: File = tempfile::tempfile().unwrap();
        {
            let mut writer = BufWriter::new(&mut file);
            InstanceJsonWriter.write(&mut writer, &instance).unwrap();
        }
        file.seek(SeekFrom::Start(0)).unwrap();
        let read_instance = InstanceJsonReader.read(BufReader::new(file)).unwrap();
        assert_eq!(instance, read_instance);
        let options = EncodingOptions::default();
        for modeling in Modeling::all() {
            assert_eq!(
                XcspWriter.write_to_string(&modeling.encode(&instance, &options).unwrap()),
                XcspWriter.write_to_string(&modeling.encode(&read_instance, &options).unwrap())
            );
        }
    }
}
