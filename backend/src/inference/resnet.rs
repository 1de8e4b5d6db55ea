//! ResNet9 leaf disease classifier on the burn NdArray backend
//!
//! Layer names mirror the trained PyTorch network so that its `.pth`
//! state dict can be loaded directly. PyTorch stores each block as an
//! `nn.Sequential`, which numbers its children; the key remaps below
//! turn `conv1.0.weight` into `conv1.conv.weight` and so on.

use std::path::Path;
use std::sync::Mutex;

use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, Linear, LinearConfig, PaddingConfig2d, Relu,
    },
    record::{CompactRecorder, FullPrecisionSettings, Recorder},
    tensor::{backend::Backend, Tensor, TensorData},
};
use burn_import::pytorch::{LoadArgs, PyTorchFileRecorder};
use shared::{DiseaseLabel, DISEASE_CLASS_COUNT};

use super::{argmax, preprocess, DiseaseClassifier, ModelError};

type CpuBackend = NdArray<f32>;

/// Conv 3x3 + batch norm + ReLU, optionally followed by a 4x4 max pool
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    conv: Conv2d<B>,
    bn: BatchNorm<B, 2>,
    relu: Relu,
    pool: Option<MaxPool2d>,
}

impl<B: Backend> ConvBlock<B> {
    pub fn new(in_channels: usize, out_channels: usize, pool: bool, device: &B::Device) -> Self {
        Self {
            conv: Conv2dConfig::new([in_channels, out_channels], [3, 3])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init(device),
            bn: BatchNormConfig::new(out_channels).init(device),
            relu: Relu::new(),
            pool: pool.then(|| MaxPool2dConfig::new([4, 4]).with_strides([4, 4]).init()),
        }
    }

    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.relu.forward(self.bn.forward(self.conv.forward(x)));
        match &self.pool {
            Some(pool) => pool.forward(x),
            None => x,
        }
    }
}

/// Two unpooled conv blocks applied as a residual branch
fn residual<B: Backend>(blocks: &[ConvBlock<B>], x: Tensor<B, 4>) -> Tensor<B, 4> {
    let branch = blocks
        .iter()
        .fold(x.clone(), |out, block| block.forward(out));
    branch + x
}

/// ResNet9 as trained on PlantVillage
#[derive(Module, Debug)]
pub struct ResNet9<B: Backend> {
    conv1: ConvBlock<B>,
    conv2: ConvBlock<B>,
    res1: Vec<ConvBlock<B>>,
    conv3: ConvBlock<B>,
    conv4: ConvBlock<B>,
    res2: Vec<ConvBlock<B>>,
    head_pool: MaxPool2d,
    classifier: Linear<B>,
}

impl<B: Backend> ResNet9<B> {
    pub fn new(in_channels: usize, num_classes: usize, device: &B::Device) -> Self {
        Self {
            conv1: ConvBlock::new(in_channels, 64, false, device),
            conv2: ConvBlock::new(64, 128, true, device),
            res1: vec![
                ConvBlock::new(128, 128, false, device),
                ConvBlock::new(128, 128, false, device),
            ],
            conv3: ConvBlock::new(128, 256, true, device),
            conv4: ConvBlock::new(256, 512, true, device),
            res2: vec![
                ConvBlock::new(512, 512, false, device),
                ConvBlock::new(512, 512, false, device),
            ],
            head_pool: MaxPool2dConfig::new([4, 4]).with_strides([4, 4]).init(),
            classifier: LinearConfig::new(512, num_classes).init(device),
        }
    }

    /// Logits of shape `[batch, num_classes]`
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let out = self.conv2.forward(self.conv1.forward(x));
        let out = residual(&self.res1, out);
        let out = self.conv4.forward(self.conv3.forward(out));
        let out = residual(&self.res2, out);
        let out = self.head_pool.forward(out);

        let [batch, channels, height, width] = out.dims();
        self.classifier
            .forward(out.reshape([batch, channels * height * width]))
    }
}

/// Thread-safe wrapper that implements [`DiseaseClassifier`]
pub struct ResNetClassifier {
    model: Mutex<ResNet9<CpuBackend>>,
    device: NdArrayDevice,
}

impl ResNetClassifier {
    /// Load trained weights.
    ///
    /// `.pth`/`.pt` files are read as PyTorch state dicts; anything else
    /// is treated as a burn record.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let device = NdArrayDevice::default();
        let model = ResNet9::<CpuBackend>::new(3, DISEASE_CLASS_COUNT, &device);

        let is_pytorch = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("pth") | Some("pt")
        );

        let model = if is_pytorch {
            let args = LoadArgs::new(path.to_path_buf())
                .with_key_remap(r"^(conv\d|res\d\.\d)\.0\.(.+)", "$1.conv.$2")
                .with_key_remap(r"^(conv\d|res\d\.\d)\.1\.(.+)", "$1.bn.$2")
                .with_key_remap(r"^classifier\.2\.(.+)", "classifier.$1");
            let record: ResNet9Record<CpuBackend> =
                PyTorchFileRecorder::<FullPrecisionSettings>::default()
                    .load(args, &device)
                    .map_err(|e| ModelError::load(path, e))?;
            model.load_record(record)
        } else {
            model
                .load_file(path, &CompactRecorder::new(), &device)
                .map_err(|e| ModelError::load(path, e))?
        };

        Ok(Self::from_model(model, device))
    }

    /// Wrap an already constructed network
    pub fn from_model(model: ResNet9<CpuBackend>, device: NdArrayDevice) -> Self {
        Self {
            model: Mutex::new(model),
            device,
        }
    }
}

impl DiseaseClassifier for ResNetClassifier {
    fn classify(&self, image_bytes: &[u8]) -> Result<DiseaseLabel, ModelError> {
        let input = preprocess::prepare(image_bytes)?;
        let shape = input.shape();
        let tensor = Tensor::<CpuBackend, 4>::from_data(
            TensorData::new(input.data, shape),
            &self.device,
        );

        let logits = {
            let model = self
                .model
                .lock()
                .map_err(|_| ModelError::Inference("model lock poisoned".to_string()))?;
            model.forward(tensor)
        };

        let scores = logits
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| ModelError::Inference(format!("{e:?}")))?;
        let index = argmax(&scores)
            .ok_or_else(|| ModelError::Inference("network returned no scores".to_string()))?;

        DiseaseLabel::from_index(index).ok_or(ModelError::UnknownClass(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "full forward pass is slow in debug builds"]
    fn test_forward_output_shape() {
        let device = NdArrayDevice::default();
        let model = ResNet9::<CpuBackend>::new(3, DISEASE_CLASS_COUNT, &device);
        let input = Tensor::<CpuBackend, 4>::zeros([1, 3, 256, 256], &device);
        assert_eq!(model.forward(input).dims(), [1, DISEASE_CLASS_COUNT]);
    }

    #[test]
    #[ignore = "full forward pass is slow in debug builds"]
    fn test_untrained_model_classifies_valid_image() {
        use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
        use std::io::Cursor;

        let image = RgbImage::from_pixel(300, 280, Rgb([40, 160, 60]));
        let mut bytes = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(image)
            .write_to(&mut bytes, ImageFormat::Png)
            .unwrap();

        let device = NdArrayDevice::default();
        let classifier = ResNetClassifier::from_model(
            ResNet9::new(3, DISEASE_CLASS_COUNT, &device),
            device,
        );
        let label = classifier.classify(&bytes.into_inner()).unwrap();
        assert!(label.index() < DISEASE_CLASS_COUNT);
    }

    #[test]
    fn test_missing_weights_fail_to_load() {
        let result = ResNetClassifier::from_path(Path::new("/nonexistent/model.pth"));
        assert!(matches!(result, Err(ModelError::Load { .. })));

        let result = ResNetClassifier::from_path(Path::new("/nonexistent/model.mpk"));
        assert!(matches!(result, Err(ModelError::Load { .. })));
    }

    #[test]
    fn test_rejects_bad_upload_before_forward_pass() {
        let device = NdArrayDevice::default();
        let classifier =
            ResNetClassifier::from_model(ResNet9::new(3, DISEASE_CLASS_COUNT, &device), device);
        assert!(matches!(
            classifier.classify(b"GIF89a but not really"),
            Err(ModelError::Decode(_))
        ));
    }
}
